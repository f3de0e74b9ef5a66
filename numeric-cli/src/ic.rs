use clap::ValueEnum;
use numeric_core::{FlowConfig, Grid};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum IcType {
    /// Block of 1.0 over the second quarter of the pipe
    Slab,
    Gaussians,
    Rectangles,
    SmoothNoise,
}

impl IcType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IcType::Slab => "slab",
            IcType::Gaussians => "gaussians",
            IcType::Rectangles => "rectangles",
            IcType::SmoothNoise => "smooth_noise",
        }
    }
}

/// Initial density for `config`'s grid, values in [0,1]. The random kinds
/// draw everything from `rng`, so a seeded rng reproduces the field.
pub fn generate_ic<R: Rng>(
    rng: &mut R,
    config: &FlowConfig,
    ic: IcType,
) -> Result<Grid, numeric_core::ConfigError> {
    let (rows, cols) = (config.num_points_y, config.num_points_x);
    let mut f = Grid::new(rows, cols)?;

    match ic {
        IcType::Slab => return config.slab(),

        IcType::Gaussians => {
            let blobs = rng.gen_range(1..=3);
            for _ in 0..blobs {
                let cx = rng.gen_range(0.15..0.85) * (cols as f64 - 1.0);
                let cy = rng.gen_range(0.15..0.85) * (rows as f64 - 1.0);
                let sigma = rng.gen_range(1.5..6.0);
                let amp = rng.gen_range(0.6..1.0);
                add_gaussian(&mut f, cx, cy, sigma, amp);
            }
        }

        IcType::Rectangles => {
            let rects = rng.gen_range(1..=4);
            for _ in 0..rects {
                let j0 = rng.gen_range(1..(cols / 2).max(2));
                let i0 = rng.gen_range(1..(rows / 2).max(2));
                let w = rng.gen_range(1..(cols / 2).max(2));
                let h = rng.gen_range(1..(rows / 2).max(2));
                let val = rng.gen_range(0.5..1.0);

                let j1 = (j0 + w).min(cols - 1);
                let i1 = (i0 + h).min(rows - 1);

                for i in i0..i1 {
                    for j in j0..j1 {
                        f.set(i, j, f.get(i, j).max(val));
                    }
                }
            }
        }

        IcType::SmoothNoise => {
            let noise = Grid::from_fn(rows, cols, |_, _| rng.gen_range(0.0..1.0))?;
            f = box_blur(&noise, 2);
        }
    }

    normalize_01(&mut f);
    Ok(f)
}

fn add_gaussian(f: &mut Grid, cx: f64, cy: f64, sigma: f64, amp: f64) {
    for i in 0..f.rows() {
        for j in 0..f.cols() {
            let dx = j as f64 - cx;
            let dy = i as f64 - cy;
            let r2 = dx * dx + dy * dy;
            let v = amp * (-0.5 * r2 / (sigma * sigma)).exp();
            f.set(i, j, f.get(i, j) + v);
        }
    }
}

fn normalize_01(f: &mut Grid) {
    let mx = f.max();
    if mx > 0.0 {
        for i in 0..f.rows() {
            for j in 0..f.cols() {
                f.set(i, j, (f.get(i, j) / mx).clamp(0.0, 1.0));
            }
        }
    }
}

fn box_blur(src: &Grid, passes: usize) -> Grid {
    let (rows, cols) = src.shape();
    let mut cur = src.clone();
    let mut tmp = src.zeros_like();

    for _ in 0..passes {
        for i in 0..rows {
            for j in 0..cols {
                let mut sum = 0.0;
                let mut cnt = 0.0;
                for ii in i.saturating_sub(1)..=(i + 1).min(rows - 1) {
                    for jj in j.saturating_sub(1)..=(j + 1).min(cols - 1) {
                        sum += cur.get(ii, jj);
                        cnt += 1.0;
                    }
                }
                tmp.set(i, j, sum / cnt);
            }
        }
        std::mem::swap(&mut cur, &mut tmp);
    }
    cur
}
