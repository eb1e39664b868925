use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(10, 12, 18),
            surface: Color::Rgb(22, 26, 34),
            text: Color::Rgb(222, 222, 222),
            text_muted: Color::Rgb(170, 174, 180),
            dim: Color::Rgb(130, 134, 140),
            accent: Color::Rgb(86, 148, 228),
            border: Color::Rgb(60, 66, 76),
            border_focused: Color::Rgb(86, 148, 228),
            positive: Color::Rgb(60, 180, 110),
            negative: Color::Rgb(220, 90, 80),
            warning: Color::Rgb(222, 170, 70),
            error: Color::Rgb(210, 80, 80),
        }
    }
}
