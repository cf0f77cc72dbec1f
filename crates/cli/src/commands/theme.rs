//! Theme command.

use go_marketplace_storefront::AppState;

use super::OutputFormat;

/// Print the active theme and its palette.
///
/// # Errors
///
/// Returns an error if JSON encoding fails.
#[allow(clippy::print_stdout)]
pub fn show(state: &AppState, format: OutputFormat) -> Result<(), serde_json::Error> {
    let theme = state.theme();
    let palette = theme.palette();
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "theme": theme,
                "palette": palette,
            }))?
        ),
        OutputFormat::Text => {
            println!("theme:       {theme}");
            println!("background:  {}", palette.background);
            println!("status bar:  {}", palette.status_bar);
        }
    }
    Ok(())
}
