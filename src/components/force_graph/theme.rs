//! Visual theming for the force graph.
//!
//! Provides the fallback color palette and the background, edge and node
//! style configuration.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		let up = |c: u8| (c as f64 + (255.0 - c as f64) * f) as u8;
		Self {
			r: up(self.r),
			g: up(self.g),
			b: up(self.b),
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		let down = |c: u8| (c as f64 * f) as u8;
		Self {
			r: down(self.r),
			g: down(self.g),
			b: down(self.b),
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}

	/// Parse `#RRGGBB` or `rgb()`/`rgba()` notation. Unparseable input is mid gray.
	pub fn parse(css: &str) -> Self {
		let gray = Self::rgb(128, 128, 128);
		if let Some(hex) = css.strip_prefix('#').filter(|h| h.len() == 6) {
			let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(128);
			return Self::rgb(channel(0), channel(2), channel(4));
		}
		if css.starts_with("rgb") {
			let nums: Vec<&str> = css
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.map(str::trim)
				.collect();
			let channel = |i: usize| nums.get(i).and_then(|s| s.parse().ok()).unwrap_or(128);
			let a = nums.get(3).and_then(|s| s.parse().ok()).unwrap_or(1.0);
			return Self::rgba(channel(0), channel(1), channel(2), a);
		}
		gray
	}
}

/// Fallback colors for groups without a fixed color.
#[derive(Clone, Debug)]
pub struct NodePalette {
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Warm, muted kitchen tones.
	pub fn pantry() -> Self {
		Self {
			colors: vec![
				Color::rgb(180, 136, 100), // Tan
				Color::rgb(120, 150, 110), // Herb
				Color::rgb(175, 150, 120), // Sand
				Color::rgb(165, 115, 90),  // Paprika
				Color::rgb(130, 120, 150), // Plum
				Color::rgb(100, 145, 135), // Sage
				Color::rgb(185, 145, 110), // Saffron
				Color::rgb(115, 135, 155), // Slate
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Solid (parent) edge color
	pub color: Color,
	/// Dashed (ingredient) edge color
	pub dashed_color: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Selection ring color
	pub selected_color: Color,
	/// Label color
	pub label_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub palette: NodePalette,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(28, 24, 22),
				color_secondary: Color::rgb(35, 30, 28),
				use_gradient: true,
				vignette: 0.18,
			},
			edge: EdgeStyle {
				color: Color::rgba(190, 165, 140, 0.55),
				dashed_color: Color::rgba(140, 150, 155, 0.4),
			},
			node: NodeStyle {
				use_gradient: true,
				selected_color: Color::rgb(255, 214, 120),
				label_color: Color::rgba(255, 255, 255, 0.85),
			},
			palette: NodePalette::pantry(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_css_notations() {
		assert_eq!(Color::parse("#5e81ac"), Color::rgb(94, 129, 172));
		assert_eq!(Color::parse("rgba(1, 2, 3, 0.5)"), Color::rgba(1, 2, 3, 0.5));
		assert_eq!(Color::parse("rgb(10,20,30)"), Color::rgb(10, 20, 30));
		assert_eq!(Color::parse("teal"), Color::rgb(128, 128, 128));
	}

	#[test]
	fn css_output_drops_alpha_when_opaque() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgba(1, 2, 3, 0.25).to_css(), "rgba(1, 2, 3, 0.25)");
	}
}
