use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("ptable version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
