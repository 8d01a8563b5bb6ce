use askama::Template;

use crate::domain::theme::ThemeAggregate;

/// Stylesheet rendered from a theme projection
#[derive(Template)]
#[template(
    ext = "css",
    escape = "none",
    source = "/* theme: {{ name }} */
.header {
  background-color: {{ header_color }};
  color: {{ header_text_color }};
  text-align: {{ header_align }};
}

.logo {
  position: absolute;
  left: {{ logo_left }}px;
  top: {{ logo_top }}px;
}
"
)]
pub struct ThemeCss<'a> {
    name: &'a str,
    header_color: String,
    header_text_color: String,
    header_align: &'static str,
    logo_left: f64,
    logo_top: f64,
}

impl<'a> ThemeCss<'a> {
    pub fn new(theme: &'a ThemeAggregate) -> Self {
        Self {
            name: &theme.name,
            header_color: theme.header.color.to_css(),
            header_text_color: theme.header.color.contrasting().to_css(),
            header_align: theme.header.align.as_css(),
            logo_left: theme.logo.left,
            logo_top: theme.logo.top,
        }
    }
}
