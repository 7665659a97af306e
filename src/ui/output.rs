use scdeploy::config::ConfigWarning;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

pub fn print_config_warnings(ui: &UiContext, warnings: &[ConfigWarning]) {
    let icon = Icon::Warning.colored(ui.color, ui.unicode);
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!(
                "{} Unknown config key '{}' in {}:{}",
                icon,
                w.key,
                w.file.display(),
                line
            );
        } else {
            eprintln!("{} Unknown config key '{}' in {}", icon, w.key, w.file.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}

pub fn print_warning(ui: &UiContext, message: &str) {
    if ui.json {
        return;
    }
    eprintln!("{} {}", Icon::Warning.colored(ui.color, ui.unicode), message);
}
