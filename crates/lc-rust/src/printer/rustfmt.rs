use lc_core::bail;
use lc_core::Result;
use std::io::Write;
use std::process::{Command, Stdio};

/// Pipes `code` through `rustfmt`; fails when the binary is missing or rejects the input.
pub fn format_code(code: &str) -> Result<String> {
    let mut fmt = Command::new("rustfmt")
        .args(["--edition", "2021", "--emit", "stdout"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    match fmt.stdin.take() {
        Some(mut stdin) => stdin.write_all(code.as_bytes())?,
        None => bail!("failed to open rustfmt stdin for writing"),
    }
    let output = fmt.wait_with_output()?;
    if !output.status.success() {
        bail!(
            "rustfmt rejected generated code: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
