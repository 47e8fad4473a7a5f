pub mod commands;
pub mod state;

use std::io::Write;

/// Prompt and read one line from stdin
pub fn readline() -> Result<String, String> {
    write!(std::io::stdout(), "discfx> ").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;
    let mut buffer = String::new();
    let read = std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    if read == 0 {
        return Ok("exit".to_string());
    }
    Ok(buffer)
}

/// `true`/`TRUE`/`True` enable, anything else disables
pub fn parse_flag(text: Option<&str>) -> bool {
    text.is_none_or(|t| t.eq_ignore_ascii_case("true"))
}
