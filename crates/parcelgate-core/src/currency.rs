// The gateway reports pounds sterling as `UKL` on some rate replies.

const ISO_POUND_STERLING: &str = "GBP";

/// Rewrite the gateway's `UKL` pound-sterling code to `GBP`.
pub fn normalize_currency(code: &str) -> String {
    if code.to_ascii_uppercase().contains("UKL") {
        ISO_POUND_STERLING.to_owned()
    } else {
        code.to_owned()
    }
}
