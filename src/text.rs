//! Prompt and output-template source: a flat key-value text file loaded once
//! at startup, plus the fixed-decimal formatting applied when a template is
//! rendered.

use std::{collections::BTreeMap, path::Path};

use crate::prelude::*;

/// Fixed-decimal numeric format: minimum width, digits after the point.
///
/// Mirrors the `%5.1f`-style specifiers of the report layout.
#[derive(Copy, Clone, Debug)]
pub struct FormatSpec {
    pub width: usize,
    pub precision: usize,
}

impl FormatSpec {
    const fn new(width: usize, precision: usize) -> Self {
        Self { width, precision }
    }

    fn format(self, value: f64) -> String {
        format!("{value:width$.precision$}", width = self.width, precision = self.precision)
    }
}

/// The six output templates, each with its lookup key and the per-value
/// format specs the template's placeholders take, left to right.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Output {
    SurfaceArea,
    AmpsRequired,
    AmpHours,
    Thickness,
    ThicknessError,
    Summary,
}

impl Output {
    pub const fn key(self) -> &'static str {
        match self {
            Self::SurfaceArea => "output.surfaceArea",
            Self::AmpsRequired => "output.ampsRequired",
            Self::AmpHours => "output.ampHours",
            Self::Thickness => "output.thickness",
            Self::ThicknessError => "output.thickness.error",
            Self::Summary => "output.summary",
        }
    }

    pub const fn formats(self) -> &'static [FormatSpec] {
        match self {
            Self::SurfaceArea => const { &[FormatSpec::new(5, 1)] },
            Self::AmpsRequired | Self::AmpHours => const { &[FormatSpec::new(5, 2)] },
            Self::Thickness => const { &[FormatSpec::new(6, 5)] },
            Self::ThicknessError => &[],
            Self::Summary => const {
                &[
                    FormatSpec::new(5, 1),
                    FormatSpec::new(5, 2),
                    FormatSpec::new(3, 0),
                    FormatSpec::new(5, 0),
                    FormatSpec::new(5, 2),
                    FormatSpec::new(5, 2),
                    FormatSpec::new(5, 2),
                    FormatSpec::new(6, 5),
                ]
            },
        }
    }
}

/// Flat string-to-string mapping behind every prompt and output template.
pub struct TextSource(BTreeMap<String, String>);

impl TextSource {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read the text file `{}`", path.display()))?;
        let source = Self::from_toml(&contents)
            .with_context(|| format!("failed to parse the text file `{}`", path.display()))?;
        info!(n_entries = source.0.len(), "loaded the text file");
        Ok(source)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let entries: BTreeMap<String, String> =
            toml::from_str(contents).context("the text file is not a flat key-value table")?;
        ensure!(!entries.is_empty(), "the text file contains no entries");
        Ok(Self(entries))
    }

    pub fn get(&self, key: &str) -> Result<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .with_context(|| format!("the text file is missing the `{key}` entry"))
    }

    /// Render the template for `output`, substituting each value into the
    /// leftmost remaining `{…}` placeholder at that position's format spec.
    ///
    /// A value count different from the template's declared spec count yields
    /// an empty string rather than a partial substitution.
    pub fn render(&self, output: Output, values: &[f64]) -> Result<String> {
        let formats = output.formats();
        if formats.len() != values.len() {
            warn!(
                key = output.key(),
                n_formats = formats.len(),
                n_values = values.len(),
                "template arity mismatch",
            );
            return Ok(String::new());
        }
        let mut rendered = self.get(output.key())?.to_owned();
        for (format, value) in formats.iter().zip(values) {
            rendered = replace_first_placeholder(&rendered, &format.format(*value));
        }
        Ok(rendered)
    }
}

/// Replace the leftmost `{…}` token, or return the template untouched when
/// none is left.
fn replace_first_placeholder(template: &str, substitution: &str) -> String {
    let Some(start) = template.find('{') else {
        return template.to_owned();
    };
    let Some(length) = template[start..].find('}') else {
        return template.to_owned();
    };
    let mut replaced = String::with_capacity(template.len() + substitution.len());
    replaced.push_str(&template[..start]);
    replaced.push_str(substitution);
    replaced.push_str(&template[start + length + 1..]);
    replaced
}
