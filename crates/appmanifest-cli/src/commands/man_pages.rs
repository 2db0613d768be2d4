use super::EXIT_SUCCESS;
use crate::BIN_NAME;
use clap::{Command, CommandFactory};
use std::path::{Path, PathBuf};

fn write_page(cmd: Command, dest: PathBuf) -> Result<PathBuf, String> {
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd)
        .render(&mut buf)
        .map_err(|e| format!("man page render failed: {e}"))?;
    std::fs::write(&dest, &buf).map_err(|e| format!("failed to write {}: {e}", dest.display()))?;
    Ok(dest)
}

pub fn run<C: CommandFactory>(dir: &Path) -> Result<u8, String> {
    std::fs::create_dir_all(dir).map_err(|e| format!("failed to create dir: {e}"))?;
    let cmd = C::command();
    let mut written = vec![write_page(cmd.clone(), dir.join(format!("{BIN_NAME}.1")))?];
    for sub in cmd.get_subcommands() {
        let dest = dir.join(format!("{BIN_NAME}-{}.1", sub.get_name()));
        written.push(write_page(sub.clone(), dest)?);
    }
    println!("{} man pages written to {}", written.len(), dir.display());
    Ok(EXIT_SUCCESS)
}
