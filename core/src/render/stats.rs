//! Rendering statistics.
//!
//! Every draw call returns a [`Stats`] describing how much work each stage
//! of the pipeline did. Stats of many calls and frames can be summed with
//! `+=` and printed as a table.

use alloc::{format, string::String};
use core::fmt::{self, Display, Formatter};
use core::ops::AddAssign;
use core::time::Duration;
#[cfg(feature = "std")]
use std::time::Instant;

/// Counters and timing of rendering work.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    /// Wall-clock time spent. Always zero without the `std` feature.
    pub time: Duration,
    /// Number of draw calls.
    pub calls: f32,
    /// Number of frames rendered.
    pub frames: f32,

    /// Triangles submitted / triangles rasterized after clipping and culling.
    pub prims: Throughput,
    /// Vertices shaded / vertices output by the clipper.
    pub verts: Throughput,
    /// Pixels covered / pixels written to the framebuffer.
    pub frags: Throughput,

    #[cfg(feature = "std")]
    started: Option<Instant>,
}

/// Number of items going into and coming out of a pipeline stage.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Throughput {
    /// Items in.
    pub i: usize,
    /// Items out.
    pub o: usize,
}

impl Stats {
    /// Returns zeroed stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns zeroed stats with a running timer.
    ///
    /// The timer is read by [`finish`][Self::finish]. Without the `std`
    /// feature there is no timer and this is the same as [`Stats::new`].
    pub fn start() -> Self {
        Self {
            #[cfg(feature = "std")]
            started: Some(Instant::now()),
            ..Self::default()
        }
    }

    /// Stops the timer, if running, and stores the elapsed time in
    /// `self.time`.
    #[must_use]
    pub fn finish(mut self) -> Self {
        #[cfg(feature = "std")]
        if let Some(started) = self.started.take() {
            self.time = started.elapsed();
        }
        self
    }

    /// Returns the stats averaged over the elapsed time, as rates per
    /// second. If no time has elapsed, returns the totals unchanged.
    pub fn per_sec(&self) -> Self {
        let secs = self.time.as_secs_f32();
        if secs == 0.0 {
            return self.clone();
        }
        Self {
            time: Duration::from_secs(1),
            calls: self.calls / secs,
            frames: self.frames / secs,
            prims: self.prims.scaled(secs),
            verts: self.verts.scaled(secs),
            frags: self.frags.scaled(secs),
            ..Self::default()
        }
    }

    /// Returns the stats averaged over the number of frames. If no frames
    /// were rendered, returns the totals unchanged.
    pub fn per_frame(&self) -> Self {
        if self.frames < 1.0 {
            return self.clone();
        }
        let n = self.frames;
        Self {
            time: self.time.div_f32(n),
            calls: self.calls / n,
            frames: 1.0,
            prims: self.prims.per_frame(n as usize),
            verts: self.verts.per_frame(n as usize),
            frags: self.frags.per_frame(n as usize),
            ..Self::default()
        }
    }

    fn throughputs(&self) -> [Throughput; 3] {
        [self.prims, self.verts, self.frags]
    }
}

impl Throughput {
    /// Returns the fraction of input items that made it to the output, or
    /// `None` if there was no input.
    pub fn ratio(&self) -> Option<f32> {
        (self.i > 0).then(|| self.o as f32 / self.i as f32)
    }

    fn scaled(&self, secs: f32) -> Self {
        Self {
            i: (self.i as f32 / secs) as usize,
            o: (self.o as f32 / secs) as usize,
        }
    }

    fn per_frame(&self, frames: usize) -> Self {
        Self { i: self.i / frames, o: self.o / frames }
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, other: Self) {
        self.time += other.time;
        self.calls += other.calls;
        self.frames += other.frames;
        self.prims += other.prims;
        self.verts += other.verts;
        self.frags += other.frags;
    }
}

impl AddAssign for Throughput {
    fn add_assign(&mut self, other: Self) {
        self.i += other.i;
        self.o += other.o;
    }
}

/// Formats `self` as a table of totals, rates per second, and averages
/// per frame.
///
/// With the alternate flag (`{:#}`), throughputs are shown as the
/// percentage of items that passed through each stage rather than as
/// absolute counts.
impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let [per_s, per_f] = [self.per_sec(), self.per_frame()];
        let na = || String::from("-");

        write_row(f, "", ["total", "per sec", "per frame"].map(String::from))?;
        write_row(f, "time", [human_time(self.time), na(), human_time(per_f.time)])?;
        write_row(f, "calls", [
            format!("{}", self.calls),
            format!("{:.1}", per_s.calls),
            format!("{:.1}", per_f.calls),
        ])?;
        write_row(f, "frames", [
            format!("{}", self.frames),
            format!("{:.1}", per_s.frames),
            na(),
        ])?;

        let alt = f.alternate();
        let cols = [self, &per_s, &per_f].map(Stats::throughputs);
        for (i, label) in ["prims", "verts", "frags"].into_iter().enumerate() {
            let cells = cols.map(|tp| {
                if alt {
                    format!("{:#}", tp[i])
                } else {
                    format!("{}", tp[i])
                }
            });
            write_row(f, label, cells)?;
        }
        Ok(())
    }
}

/// Formats `self` as `in/out` with large counts abbreviated, or with the
/// alternate flag, as the percentage of items passed through.
impl Display for Throughput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = if f.alternate() {
            self.ratio()
                .map_or_else(|| "-".into(), |r| format!("{:.1}%", 100.0 * r))
        } else {
            format!("{}/{}", human_num(self.i), human_num(self.o))
        };
        f.pad(&s)
    }
}

fn write_row(
    f: &mut Formatter<'_>,
    label: &str,
    [a, b, c]: [String; 3],
) -> fmt::Result {
    writeln!(f, "{label:<7}{a:>12}{b:>12}{c:>12}")
}

fn human_num(n: usize) -> String {
    let x = n as f32;
    match n {
        0..1_000 => format!("{n}"),
        1_000..1_000_000 => format!("{:.1}k", x / 1e3),
        1_000_000..1_000_000_000 => format!("{:.1}M", x / 1e6),
        _ => format!("{:.1}G", x / 1e9),
    }
}

fn human_time(d: Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1e-3 {
        format!("{:.1}µs", secs * 1e6)
    } else if secs < 1.0 {
        format!("{:.1}ms", secs * 1e3)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let secs = d.as_secs();
        format!("{}min {}s", secs / 60, secs % 60)
    }
}
