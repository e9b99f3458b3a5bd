//! Validation and conversion of configuration into layout types.

use matlabel_layout::{
    HostPaper, HostSetup, LabelGeometry, LabelLayout, LayoutError, POINTS_PER_INCH, SizeRange,
    Typography,
};

use crate::error::{ConfigError, ConfigResult};
use crate::model::AppConfig;

const LOG_FORMATS: &[&str] = &["json", "pretty"];

impl AppConfig {
    /// Check every section, reporting the first invalid field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] naming the section and field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::invalid(
                "database",
                "url",
                None,
                "must not be empty",
            ));
        }
        self.layout()?;
        self.host_setup()?;
        if self.telemetry.level.trim().is_empty() {
            return Err(ConfigError::invalid(
                "telemetry",
                "level",
                None,
                "must not be empty",
            ));
        }
        if let Some(format) = &self.telemetry.format
            && !LOG_FORMATS.contains(&format.to_ascii_lowercase().as_str())
        {
            return Err(ConfigError::invalid(
                "telemetry",
                "format",
                Some(format.clone()),
                "must be json or pretty",
            ));
        }
        Ok(())
    }

    /// Label content area in points.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] in the `label` section.
    pub fn label_geometry(&self) -> ConfigResult<LabelGeometry> {
        let label = &self.label;
        LabelGeometry::from_inches(
            label.width_in,
            label.height_in,
            label.margin_in,
            label.code_side_margin_in,
        )
        .map_err(|err| layout_error("label", err))
    }

    /// Typography settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] in the `typography` section.
    pub fn typography(&self) -> ConfigResult<Typography> {
        let config = &self.typography;
        let code_sizes = SizeRange::new("code_max", config.code_max, config.code_min)
            .map_err(|err| layout_error("typography", err))?;
        let description_sizes = SizeRange::new(
            "description_max",
            config.description_max,
            config.description_min,
        )
        .map_err(|err| layout_error("typography", err))?;
        let typography = Typography {
            code_face: config.code_face,
            description_face: config.description_face,
            code_sizes,
            description_sizes,
            line_spacing: config.line_spacing,
            description_top_fraction: config.description_top_fraction,
            ascent_ratio: config.ascent_ratio,
            underline_gap: config.underline_gap,
            underline_stroke: config.underline_stroke,
            alignment: config.alignment,
        };
        typography
            .validate()
            .map_err(|err| layout_error("typography", err))?;
        Ok(typography)
    }

    /// Layout engine built from the label and typography sections.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when either section is invalid or
    /// the combination leaves no room for the description.
    pub fn layout(&self) -> ConfigResult<LabelLayout> {
        let geometry = self.label_geometry()?;
        let typography = self.typography()?;
        LabelLayout::new(geometry, typography).map_err(|err| layout_error("typography", err))
    }

    /// Host page settings. Unknown paper names fall back to Letter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] for a negative or non-finite margin.
    pub fn host_setup(&self) -> ConfigResult<HostSetup> {
        let host = &self.host;
        if !(host.margin_in.is_finite() && host.margin_in >= 0.0) {
            return Err(ConfigError::invalid(
                "host",
                "margin_in",
                Some(host.margin_in.to_string()),
                "must be zero or a positive number",
            ));
        }
        let paper = HostPaper::from_name_or_letter(&host.paper);
        Ok(HostSetup {
            paper,
            margin: host.margin_in * POINTS_PER_INCH,
            scale: host.scale,
        })
    }
}

fn layout_error(section: &str, err: LayoutError) -> ConfigError {
    match err {
        LayoutError::InvalidGeometry {
            field,
            value,
            reason,
        } => ConfigError::invalid(section, field, Some(value.to_string()), reason),
        LayoutError::InvalidTypography { field, reason } => {
            ConfigError::invalid(section, field, None, reason)
        }
        LayoutError::UnknownPaper { value } => {
            ConfigError::invalid(section, "paper", Some(value), "unknown host paper")
        }
        LayoutError::UnknownScaleMode { value } => {
            ConfigError::invalid(section, "scale", Some(value), "unknown scale mode")
        }
    }
}
