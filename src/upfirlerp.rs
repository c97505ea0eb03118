use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use rustfft::num_complex::Complex;
use std::sync::Arc;
use std::time::Instant;

use crate::constants::DEFAULT_THREADS;
use crate::constants::DEFAULT_UP_RATE;
use crate::constants::MAX_THREADS;
use crate::error::{UflError, UflResult};
use crate::filter::fir_filter;
use crate::filter::fir_filter_par;
use crate::types::Sample;

/// Time of sample `n` on the upsampled grid.
pub fn grid_time(n: usize, step_sec: f64) -> f64 {
    n as f64 * step_sec
}

/// Up-sample, FIR-filter and linearly interpolate a baud-rate symbol stream.
///
/// The engine is specialised to one precision through `T`. Configuration is
/// validated by the setters, which leave the previous value in place on
/// failure. Each `interpolate` call is independent of the previous ones.
#[derive(Debug, Clone)]
pub struct UpfirLerp<T: Sample> {
    up: usize,
    threads: usize,
    taps: Vec<T>,
    pool: Option<Arc<ThreadPool>>,
}

impl<T: Sample> Default for UpfirLerp<T> {
    fn default() -> Self {
        Self {
            up: DEFAULT_UP_RATE,
            threads: DEFAULT_THREADS,
            taps: vec![],
            pool: None,
        }
    }
}

impl<T: Sample> UpfirLerp<T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set_up_rate(&mut self, up: usize) -> UflResult<&mut Self> {
        if up < 1 {
            return Err(UflError::InvalidConfig(format!(
                "upsample rate must be >= 1, got {}",
                up
            )));
        }
        self.up = up;
        log::debug!("up rate is now {}", self.up);
        Ok(self)
    }

    pub fn get_up_rate(&self) -> usize {
        self.up
    }

    /// Sets the worker count, at most `MAX_THREADS`. Every worker thread is
    /// spawned here, so a failure shows up at configuration time rather than
    /// in `interpolate`.
    pub fn set_threads(&mut self, threads: usize) -> UflResult<&mut Self> {
        if !(1..=MAX_THREADS).contains(&threads) {
            return Err(UflError::InvalidConfig(format!(
                "thread count must be in [1, {}], got {}",
                MAX_THREADS, threads
            )));
        }
        let pool = if threads > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|idx| format!("ufl-worker-{}", idx))
                .build()?;
            Some(Arc::new(pool))
        } else {
            None
        };
        self.threads = threads;
        self.pool = pool;
        log::debug!("threads is now {}", self.threads);
        Ok(self)
    }

    pub fn get_threads(&self) -> usize {
        self.threads
    }

    pub fn set_up_taps(&mut self, taps: &[T]) -> UflResult<&mut Self> {
        if taps.is_empty() {
            return Err(UflError::InvalidConfig("tap sequence is empty".into()));
        }
        self.taps = taps.to_vec();
        log::debug!("num_taps is now {}", self.taps.len());
        Ok(self)
    }

    pub fn get_up_taps(&self) -> &[T] {
        &self.taps
    }

    /// Number of samples on the upsampled grid, refused when the buffer could
    /// not be allocated.
    fn grid_len(&self, num_symbols: usize) -> UflResult<usize> {
        let len = num_symbols.checked_mul(self.up).filter(|&len| {
            len.checked_mul(std::mem::size_of::<Complex<T>>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        });
        len.ok_or_else(|| {
            UflError::InvalidConfig(format!(
                "{} symbols at up rate {} exceed the addressable grid",
                num_symbols, self.up
            ))
        })
    }

    fn check_ready(&self, baud_period_sec: f64) -> UflResult<()> {
        if self.taps.is_empty() {
            return Err(UflError::InvalidConfig("taps not set".into()));
        }
        if !baud_period_sec.is_finite() || baud_period_sec <= 0.0 {
            return Err(UflError::InvalidConfig(format!(
                "baud period must be positive, got {}",
                baud_period_sec
            )));
        }
        Ok(())
    }

    /// Filter output on the upsampled grid, `up * symbols.len()` samples.
    pub fn filter(&self, symbols: &[Complex<T>]) -> UflResult<Vec<Complex<T>>> {
        if self.taps.is_empty() {
            return Err(UflError::InvalidConfig("taps not set".into()));
        }
        self.grid_len(symbols.len())?;
        Ok(self.build_filtered(symbols))
    }

    fn build_filtered(&self, symbols: &[Complex<T>]) -> Vec<Complex<T>> {
        match &self.pool {
            Some(pool) => pool.install(|| fir_filter_par(symbols, &self.taps, self.up)),
            None => fir_filter(symbols, &self.taps, self.up),
        }
    }

    /// Evaluates the filtered waveform at every time in `t`.
    pub fn interpolate(
        &self,
        symbols: &[Complex<T>],
        baud_period_sec: f64,
        t: &[f64],
    ) -> UflResult<Vec<Complex<T>>> {
        let mut out = vec![Complex::new(T::zero(), T::zero()); t.len()];
        self.interpolate_into(symbols, baud_period_sec, t, &mut out)?;
        Ok(out)
    }

    /// Like [`UpfirLerp::interpolate`], writing into a caller-sized buffer.
    pub fn interpolate_into(
        &self,
        symbols: &[Complex<T>],
        baud_period_sec: f64,
        t: &[f64],
        out: &mut [Complex<T>],
    ) -> UflResult<()> {
        if out.len() != t.len() {
            return Err(UflError::LengthMismatch {
                expected: t.len(),
                actual: out.len(),
            });
        }
        self.check_ready(baud_period_sec)?;
        self.grid_len(symbols.len())?;

        let step_sec = baud_period_sec / self.up as f64;
        let ts = Instant::now();
        let filtered = self.build_filtered(symbols);
        log::debug!(
            "filter: {} samples in {} usec",
            filtered.len(),
            ts.elapsed().as_micros()
        );

        let ts = Instant::now();
        match &self.pool {
            Some(pool) => {
                // one contiguous range of queries per worker
                let chunk = t.len().div_ceil(self.threads).max(1);
                pool.install(|| {
                    out.par_chunks_mut(chunk)
                        .zip(t.par_chunks(chunk))
                        .for_each(|(o, q)| lerp_range(&filtered, step_sec, q, o));
                });
            }
            None => lerp_range(&filtered, step_sec, t, out),
        }
        log::debug!(
            "interpolate: {} queries on {} threads in {} usec",
            t.len(),
            self.threads,
            ts.elapsed().as_micros()
        );
        Ok(())
    }
}

fn lerp_range<T: Sample>(filtered: &[Complex<T>], step_sec: f64, t: &[f64], out: &mut [Complex<T>]) {
    for (o, &q) in out.iter_mut().zip(t.iter()) {
        *o = lerp_at(filtered, step_sec, q);
    }
}

/// Linear interpolation of `filtered` at time `q`, zero outside the grid.
fn lerp_at<T: Sample>(filtered: &[Complex<T>], step_sec: f64, q: f64) -> Complex<T> {
    let zero = Complex::new(T::zero(), T::zero());
    if filtered.is_empty() || !q.is_finite() {
        return zero;
    }
    let last = filtered.len() - 1;
    if q < 0.0 || q > grid_time(last, step_sec) {
        log::trace!(
            "t={} is outside the upsampled range [0, {}]",
            q,
            grid_time(last, step_sec)
        );
        return zero;
    }

    // floor(q / step) may land one sample off the grid times; settle on
    // t_n <= q < t_{n+1}.
    let mut n = ((q / step_sec) as usize).min(last);
    if grid_time(n, step_sec) > q {
        n -= 1;
    } else if n < last && grid_time(n + 1, step_sec) <= q {
        n += 1;
    }
    if n == last {
        return filtered[last];
    }

    let t_n = grid_time(n, step_sec);
    let frac = (q - t_n) / (grid_time(n + 1, step_sec) - t_n);
    let frac = T::from_f64(frac).unwrap_or_else(T::zero);
    filtered[n] + (filtered[n + 1] - filtered[n]) * frac
}
