//! Zoom-dependent scaling configuration for graph visuals.
//!
//! Drawing happens in world space after the pan/zoom transform. A size that
//! should stay fixed on screen is divided by the zoom level `k`; a size that
//! should grow with zoom is left alone, optionally clamped to screen-space
//! bounds so nodes never vanish when zoomed far out.

/// World-space size clamped to a minimum and maximum on-screen size.
#[derive(Clone, Copy, Debug)]
pub struct Clamped {
	pub base: f64,
	pub min_screen: f64,
	pub max_screen: f64,
}

impl Clamped {
	/// World-space value at zoom `k`.
	pub fn at(&self, k: f64) -> f64 {
		self.base.clamp(self.min_screen / k, self.max_screen / k)
	}
}

/// Linear fade between two zoom levels: invisible at `zero_k`, opaque at `full_k`.
#[derive(Clone, Copy, Debug)]
pub struct ZoomFade {
	pub zero_k: f64,
	pub full_k: f64,
}

impl ZoomFade {
	pub fn at(&self, k: f64) -> f64 {
		if self.zero_k == self.full_k {
			return 1.0;
		}
		((k - self.zero_k) / (self.full_k - self.zero_k)).clamp(0.0, 1.0)
	}
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node_radius: Clamped,
	pub hit_radius: Clamped,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Labels stop growing below this zoom.
	pub label_min_k: f64,
	/// Labels of unhighlighted nodes fade with zoom.
	pub label_fade: ZoomFade,
	/// Edge line width in screen pixels.
	pub edge_width: f64,
	/// Dash pattern (dash, gap) in world units.
	pub dash_pattern: (f64, f64),
	/// Dash flow speed in world units per second.
	pub flow_speed: f64,
	pub arrow_size: Clamped,
	/// Arrowheads fade out when zoomed far out.
	pub arrow_fade: ZoomFade,
	/// Selection and hover ring width in screen pixels.
	pub ring_width: f64,
	/// Gap between node edge and ring in screen pixels.
	pub ring_offset: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: Clamped {
				base: 5.0,
				min_screen: 5.0,
				max_screen: f64::INFINITY,
			},
			hit_radius: Clamped {
				base: 12.0,
				min_screen: 5.0,
				max_screen: f64::INFINITY,
			},
			label_size: 10.0,
			label_min_k: 0.5,
			label_fade: ZoomFade {
				zero_k: 0.35,
				full_k: 0.7,
			},
			edge_width: 1.5,
			dash_pattern: (6.0, 4.0),
			flow_speed: 12.0,
			arrow_size: Clamped {
				base: 5.0,
				min_screen: 0.0,
				max_screen: 18.0,
			},
			arrow_fade: ZoomFade {
				zero_k: 0.2,
				full_k: 0.6,
			},
			ring_width: 1.5,
			ring_offset: 2.0,
		}
	}
}

/// Scale values resolved for one zoom level, computed once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub node_radius: f64,
	pub hit_radius: f64,
	pub label_font: String,
	pub label_alpha: f64,
	pub edge_line_width: f64,
	pub dash_pattern: (f64, f64),
	pub arrow_size: f64,
	pub arrow_alpha: f64,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			k,
			node_radius: config.node_radius.at(k),
			hit_radius: config.hit_radius.at(k),
			label_font: format!("{}px sans-serif", config.label_size / k.max(config.label_min_k)),
			label_alpha: config.label_fade.at(k),
			edge_line_width: config.edge_width / k,
			dash_pattern: config.dash_pattern,
			arrow_size: config.arrow_size.at(k),
			arrow_alpha: config.arrow_fade.at(k),
			ring_width: config.ring_width / k,
			ring_offset: config.ring_offset / k,
		}
	}

	/// Dash offset for the flow animation at `flow_time` seconds.
	pub fn dash_offset(&self, flow_time: f64, flow_speed: f64) -> f64 {
		-flow_time * flow_speed
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_sizes_keep_minimum_screen_size() {
		let radius = ScaleConfig::default().node_radius;
		assert_eq!(radius.at(1.0), 5.0);
		assert_eq!(radius.at(4.0), 5.0);
		// Zoomed out to 0.5 the node would be 2.5px on screen, so it grows.
		assert_eq!(radius.at(0.5), 10.0);
	}

	#[test]
	fn fades_between_thresholds() {
		let fade = ZoomFade {
			zero_k: 0.2,
			full_k: 0.6,
		};
		assert_eq!(fade.at(0.1), 0.0);
		assert!((fade.at(0.4) - 0.5).abs() < 1e-9);
		assert_eq!(fade.at(2.0), 1.0);
	}
}
