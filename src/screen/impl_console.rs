use crate::screen::interface::{Screen, View};
use std::error::Error;
use std::io::Write;

const BAR_WIDTH: usize = 20;

pub struct ScreenConsole {
    last: Option<View>,
}

impl ScreenConsole {
    pub fn new() -> Self {
        Self { last: None }
    }
}

pub fn confidence_bar(fill_fraction: f64) -> String {
    // Drawing needs a bounded width even when the service sends odd values.
    let filled = (fill_fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

pub fn format_view(view: &View) -> Vec<String> {
    let mut lines = vec![format!("status: {}", view.status)];

    if let Some(file_name) = &view.file_name {
        match &view.preview_location {
            Some(location) => lines.push(format!("file:   {} ({})", file_name, location.display())),
            None => lines.push(format!("file:   {}", file_name)),
        }
    }

    if let Some(prediction) = &view.prediction {
        lines.push(format!(
            "result: {} {} {}",
            prediction.label,
            prediction.percent_label,
            confidence_bar(prediction.fill_fraction)
        ));
    }

    if let Some(error) = &view.error {
        lines.push(format!("error:  {}", error));
    }

    lines
}

impl Screen for ScreenConsole {
    fn show(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.last.as_ref() == Some(view) {
            return Ok(());
        }

        let mut stdout = std::io::stdout().lock();
        for line in format_view(view) {
            writeln!(stdout, "{}", line)?;
        }
        writeln!(stdout)?;
        stdout.flush()?;

        self.last = Some(view.clone());
        Ok(())
    }
}
