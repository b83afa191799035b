use console::style;

/// Theme for styled terminal output. Status lines go to stderr so stdout
/// stays clean for piped sequences and units.
#[derive(Clone)]
pub struct Theme {
    pub success: fn(&str) -> console::StyledObject<&str>,
    pub error: fn(&str) -> console::StyledObject<&str>,
    pub info: fn(&str) -> console::StyledObject<&str>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            success: |s| style(s).green().bold(),
            error: |s| style(s).red().bold(),
            info: |s| style(s).blue(),
        }
    }
}

impl Theme {
    pub fn no_color() -> Self {
        Self {
            success: |s| style(s),
            error: |s| style(s),
            info: |s| style(s),
        }
    }

    pub fn success(&self, msg: &str) {
        eprintln!("{} {}", (self.success)("✓"), msg);
    }

    pub fn error(&self, msg: &str) {
        eprintln!("{} {}", (self.error)("✗"), msg);
    }

    pub fn info(&self, msg: &str) {
        eprintln!("{} {}", (self.info)("ℹ"), msg);
    }
}
