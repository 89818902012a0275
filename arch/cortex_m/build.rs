fn main() {
    println!("cargo:rerun-if-env-changed=BOOT_FLASH_BASE");
    println!("cargo:rerun-if-env-changed=BOOT_SRAM_BASE");
}
