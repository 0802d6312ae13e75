use std::{env, path::PathBuf};

/// TKey application RAM, apps are loaded at the base and run in place
const RAM_BASE: u32 = 0x4000_0000;
const RAM_SIZE: u32 = 0x2_0000;

fn main() -> anyhow::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    if arch != "riscv32" {
        return Ok(());
    }

    // Generate linker script
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let ld_file = out_dir.join("app.lds");

    std::fs::write(&ld_file, linker_script())?;

    println!("cargo:rustc-link-arg=-T{}", ld_file.display());

    Ok(())
}

fn linker_script() -> String {
    format!(
        r#"
OUTPUT_ARCH( "riscv" )
ENTRY(_start)

MEMORY
{{
    RAM (rwx) : ORIGIN = 0x{RAM_BASE:08x}, LENGTH = 0x{RAM_SIZE:x}
}}

SECTIONS
{{
    .text.init :
    {{
        *(.text.init)
    }} >RAM

    .text :
    {{
        . = ALIGN(4);
        *(.text)
        *(.text*)
        *(.rodata)
        *(.rodata*)
        *(.srodata)
        *(.srodata*)
        . = ALIGN(4);
        _etext = .;
    }} >RAM

    .data :
    {{
        . = ALIGN(4);
        _sdata = .;
        *(.sdata)
        *(.sdata*)
        *(.data)
        *(.data*)
        . = ALIGN(4);
        _edata = .;
    }} >RAM

    .bss (NOLOAD) :
    {{
        . = ALIGN(4);
        _sbss = .;
        *(.sbss)
        *(.sbss*)
        *(.bss)
        *(.bss*)
        *(COMMON)
        . = ALIGN(4);
        _ebss = .;
    }} >RAM

    /DISCARD/ :
    {{
        *(.eh_frame)
        *(.eh_frame_hdr)
    }}

    _stack_start = ORIGIN(RAM) + LENGTH(RAM);
}}
"#
    )
}
