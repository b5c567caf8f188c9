//! Dense bootstrap matrix: rows = simulations, columns = trade index.

use ndarray::{Array2, ArrayView2, s};
use rand::Rng;

use super::config::BAND_PERCENTILES;
use crate::analytics::math::{max_drawdown, percentile_of_sorted};

/// Synthetic equity paths with their per-row max drawdown.
#[derive(Debug, Clone)]
pub(crate) struct SimulationMatrix {
    paths: Array2<f64>,
    max_drawdowns: Vec<f64>,
}

impl SimulationMatrix {
    /// Resample `pnl` with replacement into `n_simulations` equity paths.
    ///
    /// Draws are taken row-major from `rng`. `pnl` must be non-empty.
    pub(crate) fn bootstrap<R: Rng + ?Sized>(
        pnl: &[f64],
        initial_capital: f64,
        n_simulations: usize,
        rng: &mut R,
    ) -> Self {
        let n_trades = pnl.len();
        let mut paths = Array2::<f64>::zeros((n_simulations, n_trades));
        let mut max_drawdowns = Vec::with_capacity(n_simulations);

        for mut row in paths.rows_mut() {
            let mut cumulative = 0.0;
            for cell in row.iter_mut() {
                cumulative += pnl[rng.random_range(0..n_trades)];
                *cell = initial_capital + cumulative;
            }
            max_drawdowns.push(max_drawdown(row.iter()));
        }

        Self {
            paths,
            max_drawdowns,
        }
    }

    pub(crate) fn n_simulations(&self) -> usize {
        self.paths.nrows()
    }

    /// Last equity point of every row.
    pub(crate) fn final_equities(&self) -> Vec<f64> {
        let last = self.paths.ncols().saturating_sub(1);
        self.paths.column(last).to_vec()
    }

    pub(crate) fn max_drawdowns(&self) -> &[f64] {
        &self.max_drawdowns
    }

    /// View of every `stride`-th column, starting at column 0.
    pub(crate) fn downsampled(&self, stride: usize) -> ArrayView2<'_, f64> {
        let step = isize::try_from(stride.max(1)).unwrap_or(isize::MAX);
        self.paths.slice(s![.., ..;step])
    }
}

/// Per-column percentile bands, one sequence per entry of [`BAND_PERCENTILES`].
pub(crate) fn percentile_bands(paths: ArrayView2<'_, f64>) -> [Vec<f64>; 5] {
    let mut bands: [Vec<f64>; 5] = Default::default();
    for band in &mut bands {
        band.reserve(paths.ncols());
    }

    for column in paths.columns() {
        let mut sorted = column.to_vec();
        sorted.sort_by(f64::total_cmp);
        for (band, q) in bands.iter_mut().zip(BAND_PERCENTILES) {
            band.push(percentile_of_sorted(&sorted, q));
        }
    }
    bands
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_bootstrap_shape_and_start() {
        let mut rng = StdRng::seed_from_u64(7);
        let matrix = SimulationMatrix::bootstrap(&[1.0, 2.0, 3.0], 100.0, 4, &mut rng);

        assert_eq!(matrix.n_simulations(), 4);
        assert_eq!(matrix.paths.ncols(), 3);
        assert_eq!(matrix.max_drawdowns().len(), 4);
        for row in matrix.paths.rows() {
            assert!(row[0] > 100.0 && row[0] <= 103.0);
        }
    }

    #[test]
    fn test_single_value_series_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let matrix = SimulationMatrix::bootstrap(&[-10.0], 50.0, 3, &mut rng);

        assert_eq!(matrix.final_equities(), vec![40.0, 40.0, 40.0]);
        assert_eq!(matrix.max_drawdowns(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_drawdowns_match_rows() {
        let mut rng = StdRng::seed_from_u64(3);
        let matrix = SimulationMatrix::bootstrap(&[50.0, -80.0, 20.0], 1000.0, 16, &mut rng);

        for (row, dd) in matrix.paths.rows().into_iter().zip(matrix.max_drawdowns()) {
            assert_eq!(*dd, max_drawdown(row.iter()));
        }
    }

    #[test]
    fn test_downsampled_keeps_first_column_and_stride() {
        let mut rng = StdRng::seed_from_u64(5);
        let pnl: Vec<f64> = (0..10).map(f64::from).collect();
        let matrix = SimulationMatrix::bootstrap(&pnl, 0.0, 2, &mut rng);

        let sampled = matrix.downsampled(3);
        assert_eq!(sampled.ncols(), 4);
        assert_eq!(sampled.column(1), matrix.paths.column(3));
        assert_eq!(sampled.column(3), matrix.paths.column(9));

        assert_eq!(matrix.downsampled(1), matrix.paths.view());
        assert_eq!(matrix.downsampled(20).ncols(), 1);
    }

    #[test]
    fn test_downsampled_is_a_view_of_the_matrix() {
        let mut rng = StdRng::seed_from_u64(9);
        let matrix = SimulationMatrix::bootstrap(&[1.0, -2.0, 3.0], 10.0, 2, &mut rng);

        let view = matrix.downsampled(1);
        assert!(std::ptr::eq(view.as_ptr(), matrix.paths.as_ptr()));
    }

    #[test]
    fn test_percentile_bands() {
        let paths =
            Array2::from_shape_vec((5, 2), vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0, 5.0, 50.0])
                .unwrap();
        let [p5, p25, p50, p75, p95] = percentile_bands(paths.view());

        assert_eq!(p50, vec![3.0, 30.0]);
        assert_eq!(p25, vec![2.0, 20.0]);
        assert_eq!(p75, vec![4.0, 40.0]);
        assert!((p5[0] - 1.2).abs() < 1e-12);
        assert!((p95[1] - 48.0).abs() < 1e-12);
    }
}
