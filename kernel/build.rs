use std::{env, fs, path::PathBuf};

const LINK_TEMPLATE: &str = include_str!("link.ld.in");

/// Build environment variables, with their defaults.
const MEMORY_MAP: &[(&str, &str)] = &[
    ("BOOT_FLASH_BASE", "0x00000000"),
    ("BOOT_FLASH_SIZE", "0x00100000"),
    ("BOOT_SRAM_BASE", "0x20000000"),
    ("BOOT_SRAM_SIZE", "0x00040000"),
];

fn main() {
    println!("cargo:rerun-if-changed=link.ld.in");
    for (var, _) in MEMORY_MAP {
        println!("cargo:rerun-if-env-changed={}", var);
    }

    // Only bare-metal Cortex-M images get the linker script.
    let target = env::var("TARGET").unwrap_or_default();
    if !target.starts_with("thumb") {
        return;
    }

    if env::var_os("CARGO_FEATURE_FLOAT").is_some() && !target.ends_with("eabihf") {
        println!(
            "cargo:warning=`float` is enabled for {}, FP instructions need an eabihf target",
            target
        );
    }

    // XIP images run from flash and copy `.data` into RAM; loaded images live
    // entirely in RAM, so `.data` is already in place.
    let image = if env::var_os("CARGO_FEATURE_XIP").is_some() {
        "FLASH"
    } else {
        "RAM"
    };

    let mut script = LINK_TEMPLATE.replace("@IMAGE@", image);
    for (var, default) in MEMORY_MAP {
        let value = env::var(var).unwrap_or_else(|_| (*default).to_string());
        let placeholder = format!("@{}@", var.trim_start_matches("BOOT_"));
        script = script.replace(&placeholder, &value);
    }

    let out = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
    fs::write(out.join("link.ld"), script).expect("failed to write link.ld");

    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rustc-link-arg-bins=-Tlink.ld");
}
