use clap::Args;
use color_eyre::eyre::{Result, WrapErr};

use beatgrid::analysis;
use beatgrid::dsp::{FirKernel, Window};

/// Frequencies reported alongside the band edges.
const PROBES_HZ: [f64; 6] = [50.0, 200.0, 1_000.0, 4_000.0, 12_000.0, 18_000.0];

#[derive(Args)]
pub struct KernelArgs {
    /// Lower band edge in Hz
    #[arg(long)]
    lo: f64,

    /// Upper band edge in Hz
    #[arg(long)]
    hi: f64,

    /// Kernel length (odd)
    #[arg(long, default_value_t = 257)]
    taps: usize,

    /// hann or hamming
    #[arg(long, default_value_t = Window::Hann)]
    window: Window,

    #[arg(long, default_value_t = 44_100)]
    sample_rate: u32,
}

pub fn execute(args: KernelArgs) -> Result<()> {
    let kernel = FirKernel::bandpass(args.sample_rate, args.lo, args.hi, args.taps, args.window)
        .wrap_err("kernel design failed")?;

    let sum: f64 = kernel.taps().iter().sum();
    println!(
        "{} taps, {} window, group delay {} samples, sum {sum:.12}",
        kernel.len(),
        args.window,
        kernel.group_delay()
    );

    let nyquist = args.sample_rate as f64 / 2.0;
    let mut probes: Vec<f64> = PROBES_HZ
        .iter()
        .copied()
        .chain([args.lo, args.hi])
        .filter(|&f| f < nyquist)
        .collect();
    probes.sort_by(f64::total_cmp);

    for freq in probes {
        let gain = analysis::gain_at(&kernel, freq, args.sample_rate);
        println!("{freq:>10.1} Hz  {:>8.2} dB", analysis::to_db(gain));
    }
    Ok(())
}
