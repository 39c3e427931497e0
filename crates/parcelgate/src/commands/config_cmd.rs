//! Config subcommand handlers.

use std::fmt::Write;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    for name in config::profile_names(cfg) {
        let p = &cfg.profiles[&name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "csp_key = \"{}\"", p.csp_key);
        if p.csp_password.is_some() {
            let _ = writeln!(out, "csp_password = \"****\"");
        }
        if let Some(ref env) = p.csp_password_env {
            let _ = writeln!(out, "csp_password_env = \"{env}\"");
        }
        let plain = [
            ("account_number", &p.account_number),
            ("meter_number", &p.meter_number),
            ("user_key", &p.user_key),
            ("product_id", &p.product_id),
            ("product_version", &p.product_version),
            ("region", &p.region),
            ("customer_transaction_id", &p.customer_transaction_id),
            ("endpoint", &p.endpoint),
        ];
        for (key, value) in plain {
            if let Some(value) = value {
                let _ = writeln!(out, "{key} = \"{value}\"");
            }
        }
        if p.user_password.is_some() {
            let _ = writeln!(out, "user_password = \"****\"");
        }
        if p.test {
            let _ = writeln!(out, "test = true");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
    }

    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            output::print_output(&format_config_redacted(&cfg), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let active = config::active_profile_name(global, &cfg);
            let lines: Vec<String> = config::profile_names(&cfg)
                .into_iter()
                .map(|name| {
                    if name == active {
                        format!("* {name}")
                    } else {
                        format!("  {name}")
                    }
                })
                .collect();
            output::print_output(&lines.join("\n"), global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::profile_names(&cfg).join(", "),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!(
                    "{}",
                    output::success_line(
                        &format!("default profile set to '{name}'"),
                        output::should_color(&global.color),
                    )
                );
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use parcelgate_config::Profile;

    use super::*;

    #[test]
    fn secrets_are_masked() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                csp_key: "CSP_KEY".into(),
                csp_password: Some("CSP_PASS".into()),
                user_password: Some("USER_PASS".into()),
                meter_number: Some("118".into()),
                ..Profile::default()
            },
        );

        let text = format_config_redacted(&cfg);
        assert!(text.contains("[profiles.default]"));
        assert!(text.contains("meter_number = \"118\""));
        assert!(!text.contains("CSP_PASS"));
        assert!(!text.contains("USER_PASS"));
        assert!(text.contains("csp_password = \"****\""));
    }
}
