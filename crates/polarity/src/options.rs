use crate::binning::BinningOptions;
use crate::cluster::{DType, Scale};
use crate::spectral::SpectralOptions;

pub const DEFAULT_DECIMAL_PRECISION: u32 = 10;

/// Convergence controls for the singular value decomposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvdOptions {
    pub epsilon: f64,
    /// `0` iterates until convergence.
    pub max_iterations: usize,
}

impl Default for SvdOptions {
    fn default() -> Self {
        Self {
            epsilon: f64::EPSILON,
            max_iterations: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    pub dtype: DType,
    /// Always at least 1.
    pub decimal_precision: u32,
    pub x_scale_factor: f64,
    pub y_scale_factor: f64,
    /// Produce the overlap-reduced display layout.
    pub binning: bool,
    pub svd: SvdOptions,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            dtype: DType::None,
            decimal_precision: DEFAULT_DECIMAL_PRECISION,
            x_scale_factor: 1.0,
            y_scale_factor: 1.0,
            binning: false,
            svd: SvdOptions::default(),
        }
    }
}

impl AnalysisOptions {
    pub fn with_dtype(mut self, dtype: DType) -> Self {
        self.dtype = dtype;
        self
    }

    /// Values below 1 are raised to 1.
    pub fn with_decimal_precision(mut self, decimal_precision: u32) -> Self {
        self.decimal_precision = decimal_precision.max(1);
        self
    }

    pub fn with_scale(mut self, x_scale_factor: f64, y_scale_factor: f64) -> Self {
        self.x_scale_factor = x_scale_factor;
        self.y_scale_factor = y_scale_factor;
        self
    }

    pub fn with_binning(mut self, binning: bool) -> Self {
        self.binning = binning;
        self
    }

    pub fn with_svd(mut self, svd: SvdOptions) -> Self {
        self.svd = svd;
        self
    }

    pub(crate) fn spectral(&self) -> SpectralOptions {
        SpectralOptions {
            decimal_precision: self.decimal_precision.max(1),
            epsilon: self.svd.epsilon,
            max_iterations: self.svd.max_iterations,
        }
    }

    pub(crate) fn scale(&self) -> Scale {
        Scale {
            x: self.x_scale_factor,
            y: self.y_scale_factor,
        }
    }

    pub(crate) fn binning_options(&self) -> BinningOptions {
        BinningOptions {
            x_scale_factor: self.x_scale_factor,
            ..BinningOptions::default()
        }
    }
}
