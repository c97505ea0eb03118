use colored::Colorize;
use rustfft::num_complex::{Complex, Complex64};
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;
use structopt::StructOpt;

use upfirlerp::config::JobConfig;
use upfirlerp::constants::{DEFAULT_BAUD_PERIOD_SEC, DEFAULT_THREADS, DEFAULT_UP_RATE};
use upfirlerp::modulation::Qpsk;
use upfirlerp::plots::plot_interpolation;
use upfirlerp::recording::{IQFile, IQFileType};
use upfirlerp::upfirlerp::grid_time;
use upfirlerp::util::{linspace, norm_square};
use upfirlerp::{Precision, Sample, UflError, UpfirLerp};

#[derive(StructOpt, Debug)]
#[structopt(name = "upfirlerp", about = "up-sample, FIR filter and interpolate a symbol stream")]
struct Options {
    /// JSON job file with up, taps, threads and baud_period_sec
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
    #[structopt(short = "u", long)]
    up: Option<usize>,
    #[structopt(long, use_delimiter = true, allow_hyphen_values = true)]
    taps: Vec<f64>,
    #[structopt(short = "j", long)]
    threads: Option<usize>,
    /// Seconds per input symbol
    #[structopt(short = "T", long)]
    baud_period: Option<f64>,
    #[structopt(long, default_value = "double")]
    precision: Precision,
    /// QPSK symbol indices, ignored when --input is given
    #[structopt(long, use_delimiter = true, default_value = "0,1,3,2,3")]
    symbols: Vec<u8>,
    #[structopt(long, parse(from_os_str))]
    input: Option<PathBuf>,
    #[structopt(long, default_value = "2xf64")]
    input_type: IQFileType,
    #[structopt(long, use_delimiter = true, allow_hyphen_values = true)]
    times: Vec<f64>,
    /// Number of evenly spaced query times when --times is not given
    #[structopt(long, default_value = "100")]
    num_times: usize,
    #[structopt(long, parse(from_os_str))]
    output: Option<PathBuf>,
    #[structopt(long, default_value = "2xf64")]
    output_type: IQFileType,
    #[structopt(long, parse(from_os_str))]
    plot: Option<PathBuf>,
}

struct Job {
    up: usize,
    taps: Vec<f64>,
    threads: usize,
    baud_period_sec: f64,
}

impl Job {
    fn new(opt: &Options) -> Result<Self, Box<dyn Error>> {
        let cfg = match &opt.config {
            Some(path) => JobConfig::from_file(path)?,
            None => JobConfig::default(),
        };
        let taps = if !opt.taps.is_empty() {
            opt.taps.clone()
        } else {
            cfg.taps.ok_or_else(|| UflError::InvalidConfig("no taps given".into()))?
        };
        Ok(Self {
            up: opt.up.or(cfg.up).unwrap_or(DEFAULT_UP_RATE),
            taps,
            threads: opt.threads.or(cfg.threads).unwrap_or(DEFAULT_THREADS),
            baud_period_sec: opt
                .baud_period
                .or(cfg.baud_period_sec)
                .unwrap_or(DEFAULT_BAUD_PERIOD_SEC),
        })
    }
}

fn cast<T: Sample>(v: &[Complex64]) -> Vec<Complex<T>> {
    v.iter()
        .map(|c| {
            Complex::new(
                T::from_f64(c.re).unwrap_or_else(T::nan),
                T::from_f64(c.im).unwrap_or_else(T::nan),
            )
        })
        .collect()
}

fn widen<T: Sample>(v: &[Complex<T>]) -> Vec<Complex64> {
    v.iter()
        .map(|c| Complex64::new(c.re.to_f64().unwrap_or(f64::NAN), c.im.to_f64().unwrap_or(f64::NAN)))
        .collect()
}

/// Runs the job at precision `T`; returns the filtered grid and the output.
fn run<T: Sample>(
    job: &Job,
    symbols: &[Complex64],
    t: &[f64],
) -> Result<(Vec<Complex64>, Vec<Complex64>), Box<dyn Error>> {
    let taps: Vec<T> = job
        .taps
        .iter()
        .map(|&x| T::from_f64(x).unwrap_or_else(T::nan))
        .collect();
    let symbols = cast::<T>(symbols);

    let mut ufl = UpfirLerp::<T>::new();
    ufl.set_up_rate(job.up)?
        .set_threads(job.threads)?
        .set_up_taps(&taps)?;

    let ts = Instant::now();
    let out = ufl.interpolate(&symbols, job.baud_period_sec, t)?;
    log::info!(
        "interpolate: {} queries -- {} usec",
        t.len(),
        format!("{}", ts.elapsed().as_micros()).green()
    );
    let grid = ufl.filter(&symbols)?;
    Ok((widen(&grid), widen(&out)))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opt = Options::from_args();
    let job = Job::new(&opt)?;

    let symbols = match &opt.input {
        Some(path) => IQFile::new(path.clone(), opt.input_type).read_iq_file()?,
        None => Qpsk.map::<f64>(&opt.symbols)?,
    };

    let step_sec = job.baud_period_sec / job.up.max(1) as f64;
    let t = if !opt.times.is_empty() {
        opt.times.clone()
    } else {
        let num_grid = symbols.len() * job.up;
        linspace(0.0, grid_time(num_grid.saturating_sub(1), step_sec), opt.num_times)
    };

    log::info!(
        "upfirlerp: {} symbols T={} up={} num_taps={} threads={} precision={}",
        format!("{}", symbols.len()).yellow(),
        job.baud_period_sec,
        job.up,
        job.taps.len(),
        job.threads,
        opt.precision,
    );

    let (grid, out) = match opt.precision {
        Precision::Double => run::<f64>(&job, &symbols, &t)?,
        Precision::Float => run::<f32>(&job, &symbols, &t)?,
    };

    for (i, c) in out.iter().enumerate() {
        println!("{} : {}, {}", i, c.re, c.im);
    }
    log::info!("output energy: {:.6}", norm_square(&out));

    if let Some(path) = &opt.output {
        IQFile::new(path.clone(), opt.output_type).write_iq_file(&out)?;
    }
    if let Some(path) = &opt.plot {
        plot_interpolation(path, step_sec, &grid, &t, &out)?;
    }
    Ok(())
}
