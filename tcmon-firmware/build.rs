//! Build script for tcmon-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates monitor.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate monitor.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=monitor.toml");

    let config_path = Path::new("monitor.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: monitor.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a monitor.toml configuration file.          ║\n\
            ║  Please create one in the tcmon-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read monitor.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Full TOML syntax check first, for readable error positions
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail("Invalid TOML syntax in monitor.toml", &[e.to_string()]),
    };

    let errors = check_sections(&config);
    if !errors.is_empty() {
        fail("Invalid monitor.toml configuration", &errors);
    }

    // The firmware parses a TOML subset at boot; make sure it agrees
    match tcmon_core::config::parse_config(&config_content) {
        Ok(parsed) => {
            if let Err(e) = parsed.validate() {
                fail(
                    "monitor.toml rejected by the firmware",
                    &[format!("validation failed: {:?}", e)],
                );
            }
        }
        Err(e) => fail(
            "monitor.toml rejected by the firmware",
            &[format!("boot parser failed: {:?}", e)],
        ),
    }

    println!("cargo:warning=monitor.toml validated successfully");
}

/// Abort the build with a boxed error listing
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(errors)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(errors: &[String]) -> String {
    errors
        .iter()
        .flat_map(|e| e.lines())
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Expected integer range for a key
struct IntKey {
    section: &'static str,
    key: &'static str,
    min: i64,
    max: i64,
}

const INT_KEYS: &[IntKey] = &[
    IntKey { section: "display", key: "address", min: 0x08, max: 0x77 },
    IntKey { section: "display", key: "columns", min: 1, max: 20 },
    IntKey { section: "display", key: "rows", min: 1, max: 4 },
    IntKey { section: "ambient", key: "vref_mv", min: 1, max: 5000 },
    IntKey { section: "ambient", key: "full_scale", min: 1, max: 65535 },
    IntKey { section: "filter", key: "window", min: 1, max: 32 },
    IntKey { section: "ui", key: "cycle_ms", min: 100, max: 60_000 },
    IntKey { section: "ui", key: "splash_ms", min: 0, max: 60_000 },
];

/// Sections and the keys the boot parser reads from each
const SECTIONS: &[(&str, &[&str])] = &[
    ("display", &["address", "columns", "rows", "backlight"]),
    ("ambient", &["vref_mv", "full_scale"]),
    ("filter", &["window"]),
    ("compensation", &["reference_ambient_c"]),
    ("ui", &["cycle_ms", "splash_ms"]),
];

/// Check section and key names, value types and ranges
fn check_sections(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => return vec!["top level must be a table".to_string()],
    };

    for (name, value) in root {
        let keys = match SECTIONS.iter().find(|(section, _)| section == name) {
            Some((_, keys)) => keys,
            None => {
                errors.push(format!("unknown section [{}]", name));
                continue;
            }
        };
        match value.as_table() {
            Some(table) => {
                // The boot parser skips unknown keys, so catch typos here
                for key in table.keys() {
                    if !keys.contains(&key.as_str()) {
                        errors.push(format!("[{}] unknown key {}", name, key));
                    }
                }
            }
            None => errors.push(format!("[{}] must be a table", name)),
        }
    }

    for rule in INT_KEYS {
        let value = match config.get(rule.section).and_then(|s| s.get(rule.key)) {
            Some(v) => v,
            None => continue,
        };
        match value.as_integer() {
            Some(n) if n < rule.min || n > rule.max => errors.push(format!(
                "[{}] {} must be {}-{}",
                rule.section, rule.key, rule.min, rule.max
            )),
            Some(_) => {}
            None => errors.push(format!("[{}] {} must be an integer", rule.section, rule.key)),
        }
    }

    if let Some(v) = config.get("display").and_then(|s| s.get("backlight")) {
        if !v.is_bool() {
            errors.push("[display] backlight must be true or false".to_string());
        }
    }

    if let Some(v) = config
        .get("compensation")
        .and_then(|s| s.get("reference_ambient_c"))
    {
        match v.as_float().or_else(|| v.as_integer().map(|i| i as f64)) {
            Some(c) if !(-40.0..=125.0).contains(&c) => {
                errors.push("[compensation] reference_ambient_c must be -40.0-125.0".to_string())
            }
            Some(_) => {}
            None => errors.push("[compensation] reference_ambient_c must be a number".to_string()),
        }
    }

    errors
}
