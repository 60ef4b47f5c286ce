//! Math quiz clocks: each row is an arithmetic expression whose value is
//! the current hour, minute, or second. Problems change every
//! `quiz_secs` so there is time to solve them.

use core::fmt::Write as _;

use super::{Context, Page};

/// Small linear congruential generator (Numerical Recipes constants).
/// Deterministic in its seed, which makes the screens pure functions of
/// the current time bucket.
struct Lcg(u32);

impl Lcg {
    fn new(seed: u32) -> Self {
        // Scramble so that consecutive buckets do not produce near-equal
        // first draws.
        let mut lcg = Self(seed ^ 0x5DEE_CE66);
        lcg.next();
        lcg
    }

    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.0
    }

    /// Uniform-ish draw in `lo..=hi`.
    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next() >> 16) % (hi - lo + 1)
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    const fn title(self) -> &'static str {
        match self {
            Self::Add => "addition quiz",
            Self::Sub => "subtraction quiz",
            Self::Mul => "multiply quiz",
            Self::Div => "division quiz",
        }
    }
}

fn write_problem(page: &mut Page, row: usize, label: &str, value: u8, op: Op, lcg: &mut Lcg) {
    let value = u32::from(value);
    let (a, symbol, b) = match op {
        Op::Add => {
            let a = lcg.range(0, value.max(1));
            (a.min(value), '+', value - a.min(value))
        }
        Op::Sub => {
            let extra = lcg.range(1, 30);
            (value + extra, '-', extra)
        }
        Op::Mul => {
            // Pick a divisor so the product is exact; primes fall back to x1.
            let mut divisor = 1;
            if value > 3 {
                let start = lcg.range(2, 9);
                for candidate in 0..8 {
                    let d = 2 + (start - 2 + candidate) % 8;
                    if value % d == 0 {
                        divisor = d;
                        break;
                    }
                }
            }
            (value / divisor.max(1), '*', divisor)
        }
        Op::Div => {
            let b = lcg.range(2, 9);
            (value * b, '/', b)
        }
    };
    let mut w = page.writer(row, 0);
    let _ = write!(w, "{label}  {a} {symbol} {b}");
}

fn quiz(ctx: &Context<'_>, op: Op) -> Page {
    let t = ctx.local.time();
    let bucket = ctx.utc.unix_timestamp() / i64::from(ctx.settings.quiz_secs.max(1));
    let mut page = Page::new();
    page.center(0, op.title());
    for (row, (label, value, salt)) in
        [("h", t.hour(), 0x68u32), ("m", t.minute(), 0x6D), ("s", t.second(), 0x73)]
            .into_iter()
            .enumerate()
    {
        let mut lcg = Lcg::new((bucket as u32).wrapping_mul(31).wrapping_add(salt));
        write_problem(&mut page, row + 1, label, value, op, &mut lcg);
    }
    page
}

pub(super) fn add(ctx: &Context<'_>) -> Page {
    quiz(ctx, Op::Add)
}

pub(super) fn subtract(ctx: &Context<'_>) -> Page {
    quiz(ctx, Op::Sub)
}

pub(super) fn multiply(ctx: &Context<'_>) -> Page {
    quiz(ctx, Op::Mul)
}

pub(super) fn divide(ctx: &Context<'_>) -> Page {
    quiz(ctx, Op::Div)
}
