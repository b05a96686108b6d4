//! Image asset reference to CDN URL resolution.
//!
//! Image documents reference assets as `image-<id>-<width>x<height>-<format>`;
//! the asset itself is served from
//! `https://cdn.sanity.io/images/<project>/<dataset>/<id>-<width>x<height>.<format>`.

const IMAGE_CDN_BASE: &str = "https://cdn.sanity.io/images";

/// Builds public image URLs for one project and dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// Resolves an asset reference to its CDN URL.
    ///
    /// Returns `None` if the reference does not have the
    /// `image-<id>-<width>x<height>-<format>` shape.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let builder = ImageUrlBuilder::new("cjwn5jgq", "production");
    /// assert_eq!(
    ///     builder.resolve("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg").unwrap(),
    ///     "https://cdn.sanity.io/images/cjwn5jgq/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg"
    /// );
    /// ```
    pub fn resolve(&self, reference: &str) -> Option<String> {
        let rest = reference.strip_prefix("image-")?;

        let mut parts = rest.rsplitn(3, '-');
        let format = parts.next()?;
        let dimensions = parts.next()?;
        let id = parts.next()?;

        if id.is_empty()
            || format.is_empty()
            || !format.chars().all(|c| c.is_ascii_alphanumeric())
            || !is_dimensions(dimensions)
        {
            return None;
        }

        Some(format!(
            "{}/{}/{}/{}-{}.{}",
            IMAGE_CDN_BASE, self.project_id, self.dataset, id, dimensions, format
        ))
    }
}

/// Checks for `<digits>x<digits>`.
fn is_dimensions(value: &str) -> bool {
    let Some((width, height)) = value.split_once('x') else {
        return false;
    };

    let is_number = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    is_number(width) && is_number(height)
}
