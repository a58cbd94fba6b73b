use crate::ast::{Symbol, Expression, first_dissimilarity};
use crate::error::VerifyError;

/// Window lengths at or above this are compared without caching
const MEMO_SPAN: usize = 8;

/// Results of suffix comparisons for a single pair of expressions,
/// keyed by the pair of window lengths that were claimed.
///
/// Only the keys written since the last reset are cleared on reset.
#[derive(Debug, Clone)]
pub struct SuffixMemo {
    results: [[Option<bool>; MEMO_SPAN]; MEMO_SPAN],
    touched: Vec<(usize, usize)>,
}

impl SuffixMemo {
    pub fn new() -> SuffixMemo {
        SuffixMemo {
            results: [[None; MEMO_SPAN]; MEMO_SPAN],
            touched: Vec::with_capacity(16),
        }
    }
    /// The cached answer for this pair of window lengths, if any
    pub fn cached(&self, len_f: usize, len_g: usize) -> Option<bool> {
        if len_f < MEMO_SPAN && len_g < MEMO_SPAN {
            self.results[len_f][len_g]
        } else {
            None
        }
    }
    fn record(&mut self, len_f: usize, len_g: usize, result: bool) {
        if len_f < MEMO_SPAN && len_g < MEMO_SPAN {
            self.results[len_f][len_g] = Some(result);
            self.touched.push((len_f, len_g));
        }
    }
    /// Forget every entry written since the previous reset
    pub fn reset(&mut self) {
        for (len_f, len_g) in self.touched.drain(..) {
            self.results[len_f][len_g] = None;
        }
    }
    /// Number of entries currently cached
    pub fn len(&self) -> usize {
        self.touched.len()
    }
    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }
}

impl Default for SuffixMemo {
    fn default() -> Self {
        SuffixMemo::new()
    }
}

/// One `(f, g)` pair under comparison: where each one stops,
/// where they first differ, and the suffix memo scoped to this pair.
pub struct Comparison<'a> {
    f: &'a [Symbol],
    g: &'a [Symbol],
    f_stop: usize,
    g_stop: usize,
    anchor: usize,
    memo: &'a mut SuffixMemo,
}

impl<'a> Comparison<'a> {
    /// Prepare to compare `f` against `g`, resetting `memo` for this pair.
    ///
    /// Returns `Ok(None)` when there is no dissimilarity to justify
    /// (identical terms, or a `Stop` before any difference).
    pub fn new(f: &'a Expression, g: &'a Expression, memo: &'a mut SuffixMemo) -> Result<Option<Comparison<'a>>, MissingStop> {
        memo.reset();
        let f_stop = f.locate_stop().ok_or(MissingStop::Before)?;
        let g_stop = g.locate_stop().ok_or(MissingStop::After)?;
        let anchor = match first_dissimilarity(f.symbols(), g.symbols()) {
            Some(anchor) => anchor,
            None => return Ok(None),
        };
        Ok(Some(Comparison {
            f: f.symbols(),
            g: g.symbols(),
            f_stop,
            g_stop,
            anchor,
            memo,
        }))
    }
    /// The dissimilarity anchor
    pub fn anchor(&self) -> usize {
        self.anchor
    }
    pub fn memo(&self) -> &SuffixMemo {
        &*self.memo
    }
    /// The symbol `offset` places after the anchor in `f`, or `Stop` past the end
    pub fn f_at(&self, offset: usize) -> Symbol {
        self.f.get(self.anchor + offset).copied().unwrap_or(Symbol::Stop)
    }
    /// The symbol `offset` places after the anchor in `g`, or `Stop` past the end
    pub fn g_at(&self, offset: usize) -> Symbol {
        self.g.get(self.anchor + offset).copied().unwrap_or(Symbol::Stop)
    }
    /// The symbol just before the anchor, which is the same in both
    pub fn preceding(&self) -> Option<Symbol> {
        if self.anchor == 0 {
            None
        } else {
            Some(self.f[self.anchor - 1])
        }
    }
    /// Did nothing change outside a window of `len_f` symbols of `f`
    /// and `len_g` symbols of `g`, both starting at the anchor?
    pub fn same_suffix(&mut self, len_f: usize, len_g: usize) -> bool {
        if let Some(result) = self.memo.cached(len_f, len_g) {
            trace!("suffix ({}, {}) cached: {}", len_f, len_g, result);
            return result;
        }
        let result = self.compare_suffix(len_f, len_g);
        self.memo.record(len_f, len_g, result);
        result
    }
    fn compare_suffix(&self, len_f: usize, len_g: usize) -> bool {
        let i = self.anchor + len_f;
        let j = self.anchor + len_g;
        if i > self.f_stop || j > self.g_stop {
            // a window must lie within its expression
            return false;
        }
        if self.f_stop - i != self.g_stop - j {
            // the ends of both expressions do not line up with the claimed windows
            return false;
        }
        self.f[i..self.f_stop] == self.g[j..self.g_stop]
    }
}

/// Which side of a comparison had no `Stop`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MissingStop {
    Before,
    After,
}

impl MissingStop {
    /// Name the offending expression, given the proof step indices of both sides
    pub fn at(self, before: Option<usize>, after: Option<usize>) -> VerifyError {
        let step = match self {
            MissingStop::Before => before,
            MissingStop::After => after,
        };
        VerifyError::MalformedExpression { step }
    }
}
