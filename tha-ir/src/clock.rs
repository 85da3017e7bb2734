//! Per-mode clock symbolic model: a finite uniform time grid with
//! conversions between real time values and time indices.
use crate::ids::TimeIdx;
use tha_idx::IndexRef;

/// Absolute tolerance used by [`ClockModel::int_of_time`] to decide a real
/// time value lands exactly on a grid point rather than between two.
const EPS: f64 = 1e-7;

/// `tsteps[k] = (τ₀, …, τ_L)` with constant step `Δt`. A clock with a
/// single element is "frozen" (`is_active == false`): every time-related
/// query collapses to index `0`.
#[derive(Debug, Clone)]
pub struct ClockModel {
    tsteps: Vec<f64>,
    is_active: bool,
}

impl ClockModel {
    /// A clock that never advances; the mode has no meaningful time
    /// dimension.
    pub fn frozen() -> Self {
        Self {
            tsteps: vec![0.0],
            is_active: false,
        }
    }

    /// Builds `tsteps = (0, Δt, 2Δt, …)` up to (and including) `horizon`.
    pub fn from_horizon(horizon: f64, dt: f64) -> Self {
        assert!(dt > 0.0, "active clock requires a positive time step");
        let steps = (horizon / dt).round() as usize;
        let tsteps: Vec<f64> = (0..=steps).map(|i| i as f64 * dt).collect();
        Self {
            is_active: tsteps.len() > 1,
            tsteps,
        }
    }

    pub fn tsteps(&self) -> &[f64] {
        &self.tsteps
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn len(&self) -> usize {
        self.tsteps.len()
    }

    /// Approximate match within [`EPS`], else the index minimizing
    /// `|τ − τ_i|`. Always succeeds for a `τ` within the clock's declared
    /// range; see [`ClockModel::locate`] for the stricter query used by the
    /// switching builder.
    pub fn int_of_time(&self, tau: f64) -> TimeIdx {
        if !self.is_active {
            return TimeIdx::new(0);
        }
        if let Some(i) = self.exact_index(tau) {
            return TimeIdx::new(i);
        }
        let nearest = self
            .tsteps
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (**a - tau).abs().partial_cmp(&(**b - tau).abs()).unwrap()
            })
            .map(|(i, _)| i)
            .unwrap_or(0);
        TimeIdx::new(nearest)
    }

    pub fn floor_int(&self, tau: f64) -> TimeIdx {
        if !self.is_active {
            return TimeIdx::new(0);
        }
        let idx = self
            .tsteps
            .iter()
            .rposition(|&t| t <= tau + EPS)
            .unwrap_or(0);
        TimeIdx::new(idx)
    }

    pub fn ceil_int(&self, tau: f64) -> TimeIdx {
        if !self.is_active {
            return TimeIdx::new(0);
        }
        let idx = self
            .tsteps
            .iter()
            .position(|&t| t >= tau - EPS)
            .unwrap_or(self.tsteps.len() - 1);
        TimeIdx::new(idx)
    }

    /// All indices `i` with `t_min ≤ tsteps[i] ≤ t_max`, in increasing
    /// order.
    pub fn indices_in_interval(&self, t_min: f64, t_max: f64) -> Vec<TimeIdx> {
        if !self.is_active {
            return if t_min <= EPS && t_max >= -EPS {
                vec![TimeIdx::new(0)]
            } else {
                vec![]
            };
        }
        self.tsteps
            .iter()
            .enumerate()
            .filter(|(_, &t)| t >= t_min - EPS && t <= t_max + EPS)
            .map(|(i, _)| TimeIdx::new(i))
            .collect()
    }

    /// The sentinel-zero protocol's time-index counterpart (design note
    /// "Avoid exceptions for expected misses"): `None` when `tau` falls
    /// outside the clock's declared range entirely, used by the switching
    /// builder to decide whether a reset image's time component is
    /// representable at all. Returns `Some` with the same index
    /// [`ClockModel::int_of_time`] would, otherwise.
    pub fn locate(&self, tau: f64) -> Option<TimeIdx> {
        if !self.is_active {
            return if (tau).abs() <= EPS {
                Some(TimeIdx::new(0))
            } else {
                None
            };
        }
        let lo = *self.tsteps.first().unwrap();
        let hi = *self.tsteps.last().unwrap();
        if tau < lo - EPS || tau > hi + EPS {
            None
        } else {
            Some(self.int_of_time(tau))
        }
    }

    fn exact_index(&self, tau: f64) -> Option<usize> {
        self.tsteps.iter().position(|&t| (t - tau).abs() <= EPS)
    }
}
