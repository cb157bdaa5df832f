//! Figure combinator
//!
//! Wraps a function returning a rendered [`Figure`] and appends it to the
//! report. A function declaring `img_metadata` receives the initial
//! metadata and may return an updated copy with the figure.

use verity_params::{Params, Signature};
use verity_report::{Figure, FigureMetadata, ReportHandle};

/// Argument name the metadata is passed under
pub const IMG_METADATA_PARAM: &str = "img_metadata";

/// What a figure function returns
#[derive(Debug, Clone)]
pub struct Rendered {
    /// The figure
    pub figure: Figure,
    /// Replacement metadata, if the function produced one
    pub metadata: Option<FigureMetadata>,
}

impl From<Figure> for Rendered {
    fn from(figure: Figure) -> Self {
        Self {
            figure,
            metadata: None,
        }
    }
}

impl From<(Figure, FigureMetadata)> for Rendered {
    fn from((figure, metadata): (Figure, FigureMetadata)) -> Self {
        Self {
            figure,
            metadata: Some(metadata),
        }
    }
}

/// Wraps functions with figure capture
#[derive(Debug, Clone)]
pub struct FigureReporter {
    report: ReportHandle,
    name: Option<String>,
}

impl FigureReporter {
    /// Create reporter titling figures with `name`
    pub fn new(report: ReportHandle, name: Option<&str>) -> Self {
        Self {
            report,
            name: name.map(str::to_string),
        }
    }

    /// Wrap a function
    pub fn wrap<F>(self, signature: Signature, func: F) -> WithFigure<F> {
        WithFigure {
            reporter: self,
            signature,
            func,
        }
    }

    fn initial_metadata(&self) -> FigureMetadata {
        FigureMetadata {
            title: self.name.clone(),
            ..FigureMetadata::default()
        }
    }
}

/// A function wrapped by [`FigureReporter::wrap`]
#[derive(Debug, Clone)]
pub struct WithFigure<F> {
    reporter: FigureReporter,
    signature: Signature,
    func: F,
}

impl<F> WithFigure<F> {
    /// Call the function and append its figure to the report
    ///
    /// # Errors
    /// The function's own error; nothing is captured.
    pub fn call<R, E>(&self, mut kwargs: Params) -> anyhow::Result<(Figure, FigureMetadata)>
    where
        F: Fn(&Params) -> Result<R, E>,
        R: Into<Rendered>,
        E: Into<anyhow::Error>,
    {
        let initial = self.reporter.initial_metadata();
        if self.signature.accepts(IMG_METADATA_PARAM) {
            kwargs.set_serialized(IMG_METADATA_PARAM, &initial)?;
        }

        let rendered: Rendered = (self.func)(&kwargs).map_err(Into::<anyhow::Error>::into)?.into();
        let metadata = rendered.metadata.unwrap_or(initial);

        tracing::debug!(function = self.signature.name(), title = ?metadata.title, "captured figure");
        self.reporter
            .report
            .capture_figure(metadata.clone(), rendered.figure.clone());
        Ok((rendered.figure, metadata))
    }

    /// Signature of the wrapped function
    #[inline]
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}
