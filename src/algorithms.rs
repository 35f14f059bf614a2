// SPDX-License-Identifier: MIT
// Pure Rust implementations of the distance kernels.
// Levenshtein runs Myers' bit-parallel algorithm (single + multi-word) with an
// optional score cutoff; editops are recovered with a divide-and-conquer over
// forward/reverse score rows so auxiliary memory stays linear in the target.

use rustc_hash::FxHashMap;

use crate::error::InvalidEditops;

pub trait HashableChar: Copy + Eq + std::hash::Hash + Ord {
    fn as_usize(&self) -> Option<usize>;
}
impl HashableChar for u8 {
    #[inline] fn as_usize(&self) -> Option<usize> { Some(*self as usize) }
}
impl HashableChar for u16 {
    #[inline] fn as_usize(&self) -> Option<usize> { if *self < 256 { Some(*self as usize) } else { None } }
}
impl HashableChar for u32 {
    #[inline] fn as_usize(&self) -> Option<usize> { if *self < 256 { Some(*self as usize) } else { None } }
}
impl HashableChar for u64 {
    #[inline] fn as_usize(&self) -> Option<usize> { if *self < 256 { Some(*self as usize) } else { None } }
}

// ---------------------------------------------------------------------------
// Character-position index: per pattern character, a bitmask of the positions
// it occupies. Dense array for code units < 256, hash map above.
// ---------------------------------------------------------------------------

pub struct PatternMask64<T: HashableChar> {
    ascii: [u64; 256],
    fallback: FxHashMap<T, u64>,
}

impl<T: HashableChar> PatternMask64<T> {
    pub fn build(pattern: &[T]) -> Self {
        debug_assert!(pattern.len() <= 64);
        let mut pm = PatternMask64 { ascii: [0; 256], fallback: FxHashMap::default() };
        for (i, &c) in pattern.iter().enumerate() {
            pm.insert(c, 1u64 << i);
        }
        pm
    }

    #[inline(always)]
    pub fn insert(&mut self, c: T, mask: u64) {
        if let Some(idx) = c.as_usize() {
            self.ascii[idx] |= mask;
        } else {
            *self.fallback.entry(c).or_insert(0) |= mask;
        }
    }

    #[inline(always)]
    pub fn get(&self, c: T) -> u64 {
        if let Some(idx) = c.as_usize() {
            self.ascii[idx]
        } else {
            self.fallback.get(&c).copied().unwrap_or(0)
        }
    }
}

pub struct PatternMaskMulti<T: HashableChar> {
    words: usize,
    ascii: Vec<u64>,
    fallback: FxHashMap<T, Vec<u64>>,
    zeros: Vec<u64>,
}

impl<T: HashableChar> PatternMaskMulti<T> {
    pub fn build(pattern: &[T]) -> Self {
        let words = pattern.len().div_ceil(64);
        let mut pm = PatternMaskMulti {
            words,
            ascii: vec![0u64; 256 * words],
            fallback: FxHashMap::default(),
            zeros: vec![0; words],
        };
        for (i, &c) in pattern.iter().enumerate() {
            pm.set_bit(c, i / 64, i % 64);
        }
        pm
    }

    #[inline(always)]
    fn set_bit(&mut self, c: T, word_idx: usize, bit_idx: usize) {
        if let Some(idx) = c.as_usize() {
            self.ascii[idx * self.words + word_idx] |= 1u64 << bit_idx;
        } else {
            let entry = self.fallback.entry(c).or_insert_with(|| vec![0u64; self.words]);
            entry[word_idx] |= 1u64 << bit_idx;
        }
    }

    #[inline(always)]
    pub fn get(&self, c: T) -> &[u64] {
        if let Some(idx) = c.as_usize() {
            &self.ascii[idx * self.words..(idx + 1) * self.words]
        } else {
            self.fallback.get(&c).map(|v| v.as_slice()).unwrap_or(&self.zeros)
        }
    }
}

// ---------------------------------------------------------------------------
// Common affix
// ---------------------------------------------------------------------------

/// Lengths trimmed off the front and back of a pair of sequences before a
/// kernel ran. Editop indices produced on the trimmed views are shifted by
/// `prefix_len` to land back in the original coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StringAffix {
    pub prefix_len: usize,
    pub suffix_len: usize,
}

#[inline]
pub fn common_prefix<T: HashableChar>(s1: &[T], s2: &[T]) -> usize {
    s1.iter().zip(s2.iter()).take_while(|(a, b)| a == b).count()
}

#[inline]
pub fn common_suffix<T: HashableChar>(s1: &[T], s2: &[T]) -> usize {
    s1.iter()
        .rev()
        .zip(s2.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

pub fn remove_common_affix<'a, T: HashableChar>(
    s1: &'a [T],
    s2: &'a [T],
) -> (&'a [T], &'a [T], StringAffix) {
    let prefix_len = common_prefix(s1, s2);
    let (s1, s2) = (&s1[prefix_len..], &s2[prefix_len..]);
    let suffix_len = common_suffix(s1, s2);
    (
        &s1[..s1.len() - suffix_len],
        &s2[..s2.len() - suffix_len],
        StringAffix { prefix_len, suffix_len },
    )
}

// ---------------------------------------------------------------------------
// Edit operations
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditKind {
    Delete,
    Insert,
    Replace,
}

impl EditKind {
    pub fn tag(self) -> &'static str {
        match self {
            EditKind::Delete => "delete",
            EditKind::Insert => "insert",
            EditKind::Replace => "replace",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "delete" => Some(EditKind::Delete),
            "insert" => Some(EditKind::Insert),
            "replace" => Some(EditKind::Replace),
            _ => None,
        }
    }
}

/// One step of an edit script. `src_pos` / `dest_pos` follow the usual
/// alignment convention: a Delete names the target position its successors
/// align to, an Insert names the source position it was made before.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EditOp {
    pub kind: EditKind,
    pub src_pos: usize,
    pub dest_pos: usize,
}

impl EditOp {
    #[inline]
    pub fn new(kind: EditKind, src_pos: usize, dest_pos: usize) -> Self {
        EditOp { kind, src_pos, dest_pos }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Equal,
    Delete,
    Insert,
    Replace,
}

impl SpanKind {
    pub fn tag(self) -> &'static str {
        match self {
            SpanKind::Equal => "equal",
            SpanKind::Delete => "delete",
            SpanKind::Insert => "insert",
            SpanKind::Replace => "replace",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "equal" => Some(SpanKind::Equal),
            "delete" => Some(SpanKind::Delete),
            "insert" => Some(SpanKind::Insert),
            "replace" => Some(SpanKind::Replace),
            _ => None,
        }
    }
}

impl From<EditKind> for SpanKind {
    fn from(kind: EditKind) -> Self {
        match kind {
            EditKind::Delete => SpanKind::Delete,
            EditKind::Insert => SpanKind::Insert,
            EditKind::Replace => SpanKind::Replace,
        }
    }
}

/// A contiguous alignment span; the opcode encoding of an edit script, which
/// unlike editops also carries Equal runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OpcodeSpan {
    pub kind: SpanKind,
    pub src_start: usize,
    pub src_end: usize,
    pub dest_start: usize,
    pub dest_end: usize,
}

// ---------------------------------------------------------------------------
// Levenshtein distance (Myers)
// ---------------------------------------------------------------------------

fn myers_64<T: HashableChar>(s1: &[T], s2: &[T], score_cutoff: Option<usize>) -> usize {
    let m = s1.len();
    let n = s2.len();
    let pm = PatternMask64::build(s1);

    let mut vp: u64 = u64::MAX;
    let mut vn: u64 = 0;
    let mut dist = m;
    let mask: u64 = 1u64 << (m - 1);

    for (i, &c) in s2.iter().enumerate() {
        let pm_j = pm.get(c);
        let x = pm_j | vn;
        let d0 = (((x & vp).wrapping_add(vp)) ^ vp) | x;
        let hp = vn | !(d0 | vp);
        let hn = d0 & vp;
        if hp & mask != 0 {
            dist += 1;
        }
        if hn & mask != 0 {
            dist -= 1;
        }
        let hp = (hp << 1) | 1;
        let hn = hn << 1;
        vp = hn | !(d0 | hp);
        vn = hp & d0;

        // Each remaining target character can lower the score by at most one.
        if let Some(cutoff) = score_cutoff {
            if dist > cutoff + (n - i - 1) {
                return cutoff + 1;
            }
        }
    }
    match score_cutoff {
        Some(cutoff) if dist > cutoff => cutoff + 1,
        _ => dist,
    }
}

fn myers_multiword<T: HashableChar>(s1: &[T], s2: &[T], score_cutoff: Option<usize>) -> usize {
    let m = s1.len();
    let n = s2.len();
    let words = m.div_ceil(64);
    let pm = PatternMaskMulti::build(s1);

    let mut vp: Vec<u64> = vec![u64::MAX; words];
    let mut vn: Vec<u64> = vec![0u64; words];
    // Scratch buffers are hoisted and swapped; allocating per character would
    // be O(len(s2)) heap traffic.
    let mut new_vp = vec![0u64; words];
    let mut new_vn = vec![0u64; words];
    let mut dist = m;

    let last_bits = if m % 64 == 0 { 64 } else { m % 64 };
    let last_valid_mask: u64 = if last_bits == 64 { u64::MAX } else { (1u64 << last_bits) - 1 };
    let last_mask: u64 = 1u64 << (last_bits - 1);
    vp[words - 1] = last_valid_mask;

    for (i, &c) in s2.iter().enumerate() {
        let pm_c = pm.get(c);
        // Carry of the (X & VP) + VP addition, propagated low to high.
        let mut add_carry: u64 = 0;
        // Bit shifted into HP; starts at 1 per Myers' boundary condition.
        let mut hp_carry: u64 = 1;
        let mut hn_carry: u64 = 0;

        for w in 0..words {
            let pm_j = pm_c[w];
            let pv = vp[w];
            let nv = vn[w];

            let x = pm_j | nv;
            let x_and_vp = x & pv;
            let (t, c1) = x_and_vp.overflowing_add(add_carry);
            let (sum, c2) = t.overflowing_add(pv);
            add_carry = (c1 as u64) | (c2 as u64);
            let d0 = (sum ^ pv) | x;

            let hp = nv | !(d0 | pv);
            let hn = d0 & pv;

            // The score is observed at the pattern's last bit, before shifting.
            if w == words - 1 {
                if hp & last_mask != 0 {
                    dist += 1;
                }
                if hn & last_mask != 0 {
                    dist -= 1;
                }
            }

            let hp_shifted = (hp << 1) | hp_carry;
            let hn_shifted = (hn << 1) | hn_carry;
            new_vp[w] = hn_shifted | !(d0 | hp_shifted);
            new_vn[w] = hp_shifted & d0;
            hp_carry = hp >> 63;
            hn_carry = hn >> 63;
        }

        new_vp[words - 1] &= last_valid_mask;
        new_vn[words - 1] &= last_valid_mask;
        std::mem::swap(&mut vp, &mut new_vp);
        std::mem::swap(&mut vn, &mut new_vn);

        if let Some(cutoff) = score_cutoff {
            if dist > cutoff + (n - i - 1) {
                return cutoff + 1;
            }
        }
    }
    match score_cutoff {
        Some(cutoff) if dist > cutoff => cutoff + 1,
        _ => dist,
    }
}

/// Unit-weight Levenshtein distance. Returns `cutoff + 1` as soon as the true
/// distance provably exceeds `score_cutoff`.
pub fn levenshtein_uniform<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: Option<usize>,
) -> usize {
    // Distance is symmetric; the shorter operand becomes the pattern.
    let (s1, s2) = if s1.len() <= s2.len() { (s1, s2) } else { (s2, s1) };
    if let Some(cutoff) = score_cutoff {
        if s2.len() - s1.len() > cutoff {
            return cutoff + 1;
        }
    }
    if s1.is_empty() {
        return s2.len();
    }
    if s1.len() <= 64 {
        myers_64(s1, s2, score_cutoff)
    } else {
        myers_multiword(s1, s2, score_cutoff)
    }
}

/// Row-rolling DP for non-unit weights.
pub fn levenshtein_generic<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    ins_cost: usize,
    del_cost: usize,
    rep_cost: usize,
) -> usize {
    if s1.is_empty() {
        return s2.len() * ins_cost;
    }
    if s2.is_empty() {
        return s1.len() * del_cost;
    }
    let m = s1.len();
    let n = s2.len();
    let mut prev: Vec<usize> = (0..=n).map(|j| j * ins_cost).collect();
    let mut curr: Vec<usize> = vec![0; n + 1];
    for i in 0..m {
        curr[0] = (i + 1) * del_cost;
        for j in 0..n {
            let cost = if s1[i] == s2[j] { 0 } else { rep_cost };
            curr[j + 1] = (curr[j] + ins_cost)
                .min(prev[j + 1] + del_cost)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

pub fn levenshtein<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    weights: (usize, usize, usize),
    score_cutoff: Option<usize>,
) -> usize {
    let (ins, del, rep) = weights;
    if (ins, del, rep) == (1, 1, 1) {
        let (s1, s2, _) = remove_common_affix(s1, s2);
        levenshtein_uniform(s1, s2, score_cutoff)
    } else {
        let dist = levenshtein_generic(s1, s2, ins, del, rep);
        match score_cutoff {
            Some(cutoff) if dist > cutoff => cutoff + 1,
            _ => dist,
        }
    }
}

/// Largest possible weighted distance between sequences of these lengths.
pub fn levenshtein_maximum(len1: usize, len2: usize, weights: (usize, usize, usize)) -> usize {
    let (ins, del, rep) = weights;
    let mut max_v = len1 * del + len2 * ins;
    if len1 >= len2 {
        max_v = max_v.min(len2 * rep + (len1 - len2) * del);
    } else {
        max_v = max_v.min(len1 * rep + (len2 - len1) * ins);
    }
    max_v
}

pub fn levenshtein_similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    weights: (usize, usize, usize),
    score_cutoff: Option<usize>,
) -> usize {
    let max_v = levenshtein_maximum(s1.len(), s2.len(), weights);
    let dist = levenshtein(s1, s2, weights, None);
    let sim = max_v.saturating_sub(dist);
    match score_cutoff {
        Some(cutoff) if sim < cutoff => 0,
        _ => sim,
    }
}

/// Distance rescaled to [0, 100]; 0 when `maximum` is 0 (both inputs empty).
pub fn normalized_distance(dist: usize, maximum: usize) -> f64 {
    if maximum == 0 {
        0.0
    } else {
        100.0 * dist as f64 / maximum as f64
    }
}

pub fn normalized_similarity(dist: usize, maximum: usize) -> f64 {
    100.0 - normalized_distance(dist, maximum)
}

pub fn levenshtein_normalized_distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    weights: (usize, usize, usize),
    score_cutoff: Option<f64>,
) -> f64 {
    let max_v = levenshtein_maximum(s1.len(), s2.len(), weights);
    let nd = normalized_distance(levenshtein(s1, s2, weights, None), max_v);
    match score_cutoff {
        Some(cutoff) if nd > cutoff => 100.0,
        _ => nd,
    }
}

pub fn levenshtein_normalized_similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    weights: (usize, usize, usize),
    score_cutoff: Option<f64>,
) -> f64 {
    let max_v = levenshtein_maximum(s1.len(), s2.len(), weights);
    let ns = normalized_similarity(levenshtein(s1, s2, weights, None), max_v);
    match score_cutoff {
        Some(cutoff) if ns < cutoff => 0.0,
        _ => ns,
    }
}

// ---------------------------------------------------------------------------
// Score rows: the distance kernel re-run to record the score against every
// prefix of the target. row[j] == distance(pattern, text[..j]).
// ---------------------------------------------------------------------------

fn score_row_64<T: HashableChar>(pattern: &[T], text: &[T], row: &mut Vec<usize>) {
    let m = pattern.len();
    let pm = PatternMask64::build(pattern);

    let mut vp: u64 = u64::MAX;
    let mut vn: u64 = 0;
    let mut dist = m;
    let mask: u64 = 1u64 << (m - 1);

    row.push(dist);
    for &c in text {
        let pm_j = pm.get(c);
        let x = pm_j | vn;
        let d0 = (((x & vp).wrapping_add(vp)) ^ vp) | x;
        let hp = vn | !(d0 | vp);
        let hn = d0 & vp;
        if hp & mask != 0 {
            dist += 1;
        }
        if hn & mask != 0 {
            dist -= 1;
        }
        let hp = (hp << 1) | 1;
        let hn = hn << 1;
        vp = hn | !(d0 | hp);
        vn = hp & d0;
        row.push(dist);
    }
}

fn score_row_multiword<T: HashableChar>(pattern: &[T], text: &[T], row: &mut Vec<usize>) {
    let m = pattern.len();
    let words = m.div_ceil(64);
    let pm = PatternMaskMulti::build(pattern);

    let mut vp: Vec<u64> = vec![u64::MAX; words];
    let mut vn: Vec<u64> = vec![0u64; words];
    let mut new_vp = vec![0u64; words];
    let mut new_vn = vec![0u64; words];
    let mut dist = m;

    let last_bits = if m % 64 == 0 { 64 } else { m % 64 };
    let last_valid_mask: u64 = if last_bits == 64 { u64::MAX } else { (1u64 << last_bits) - 1 };
    let last_mask: u64 = 1u64 << (last_bits - 1);
    vp[words - 1] = last_valid_mask;

    row.push(dist);
    for &c in text {
        let pm_c = pm.get(c);
        let mut add_carry: u64 = 0;
        let mut hp_carry: u64 = 1;
        let mut hn_carry: u64 = 0;

        for w in 0..words {
            let pm_j = pm_c[w];
            let pv = vp[w];
            let nv = vn[w];

            let x = pm_j | nv;
            let x_and_vp = x & pv;
            let (t, c1) = x_and_vp.overflowing_add(add_carry);
            let (sum, c2) = t.overflowing_add(pv);
            add_carry = (c1 as u64) | (c2 as u64);
            let d0 = (sum ^ pv) | x;

            let hp = nv | !(d0 | pv);
            let hn = d0 & pv;

            if w == words - 1 {
                if hp & last_mask != 0 {
                    dist += 1;
                }
                if hn & last_mask != 0 {
                    dist -= 1;
                }
            }

            let hp_shifted = (hp << 1) | hp_carry;
            let hn_shifted = (hn << 1) | hn_carry;
            new_vp[w] = hn_shifted | !(d0 | hp_shifted);
            new_vn[w] = hp_shifted & d0;
            hp_carry = hp >> 63;
            hn_carry = hn >> 63;
        }

        new_vp[words - 1] &= last_valid_mask;
        new_vn[words - 1] &= last_valid_mask;
        std::mem::swap(&mut vp, &mut new_vp);
        std::mem::swap(&mut vn, &mut new_vn);
        row.push(dist);
    }
}

fn levenshtein_score_row<T: HashableChar>(pattern: &[T], text: &[T], row: &mut Vec<usize>) {
    row.clear();
    row.reserve(text.len() + 1);
    if pattern.is_empty() {
        row.extend(0..=text.len());
    } else if pattern.len() <= 64 {
        score_row_64(pattern, text, row);
    } else {
        score_row_multiword(pattern, text, row);
    }
}

// ---------------------------------------------------------------------------
// Editop reconstruction
// ---------------------------------------------------------------------------

/// Minimal edit script turning `s1` into `s2`. The script length equals the
/// unit-weight distance, and replaying it with [`editops_apply`] reproduces
/// `s2` exactly.
pub fn levenshtein_editops<T: HashableChar>(s1: &[T], s2: &[T]) -> Vec<EditOp> {
    let mut ops = Vec::new();
    editops_inner(s1, s2, 0, 0, &mut ops);
    ops
}

fn editops_inner<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    src_off: usize,
    dest_off: usize,
    ops: &mut Vec<EditOp>,
) {
    let (s1, s2, affix) = remove_common_affix(s1, s2);
    let src_off = src_off + affix.prefix_len;
    let dest_off = dest_off + affix.prefix_len;
    let m = s1.len();
    let n = s2.len();

    if m == 0 {
        ops.extend((0..n).map(|j| EditOp::new(EditKind::Insert, src_off, dest_off + j)));
        return;
    }
    if n == 0 {
        ops.extend((0..m).map(|i| EditOp::new(EditKind::Delete, src_off + i, dest_off)));
        return;
    }
    if m <= 64 {
        editops_backtrace(s1, s2, src_off, dest_off, ops);
        return;
    }
    if n == 1 {
        editops_single_target(s1, s2[0], src_off, dest_off, ops);
        return;
    }

    // Divide at the middle source row. The optimal alignment passes through
    // some column c with forward[c] + reverse[n - c] equal to the total
    // distance; the leftmost such column keeps the script canonical.
    let row = m / 2;
    let mut forward = Vec::new();
    levenshtein_score_row(&s1[..row], s2, &mut forward);

    let rev_pattern: Vec<T> = s1[row..].iter().rev().copied().collect();
    let rev_text: Vec<T> = s2.iter().rev().copied().collect();
    let mut reverse = Vec::new();
    levenshtein_score_row(&rev_pattern, &rev_text, &mut reverse);
    drop(rev_pattern);
    drop(rev_text);

    let mut best_col = 0;
    let mut best_score = usize::MAX;
    for col in 0..=n {
        let score = forward[col] + reverse[n - col];
        if score < best_score {
            best_score = score;
            best_col = col;
        }
    }
    drop(forward);
    drop(reverse);

    editops_inner(&s1[..row], &s2[..best_col], src_off, dest_off, ops);
    editops_inner(&s1[row..], &s2[best_col..], src_off + row, dest_off + best_col, ops);
}

/// Single-word run keeping one (VP, VN) pair per target character, then the
/// standard backtrace: delete beats insert beats the diagonal.
fn editops_backtrace<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    src_off: usize,
    dest_off: usize,
    ops: &mut Vec<EditOp>,
) {
    let m = s1.len();
    let n = s2.len();
    let pm = PatternMask64::build(s1);

    let mut vp: u64 = if m == 64 { u64::MAX } else { (1u64 << m) - 1 };
    let mut vn: u64 = 0;

    let mut rows_vp: Vec<u64> = Vec::with_capacity(n);
    let mut rows_vn: Vec<u64> = Vec::with_capacity(n);

    for &c in s2 {
        let pm_j = pm.get(c);
        let x = pm_j | vn;
        let d0 = (((x & vp).wrapping_add(vp)) ^ vp) | x;
        let hp = vn | !(d0 | vp);
        let hn = d0 & vp;
        let hp = (hp << 1) | 1;
        let hn = hn << 1;
        vp = hn | !(d0 | hp);
        vn = hp & d0;
        rows_vp.push(vp);
        rows_vn.push(vn);
    }

    let start = ops.len();
    let mut col = m;
    let mut row = n;
    while row > 0 && col > 0 {
        if rows_vp[row - 1] & (1u64 << (col - 1)) != 0 {
            col -= 1;
            ops.push(EditOp::new(EditKind::Delete, src_off + col, dest_off + row));
        } else {
            row -= 1;
            if row > 0 && rows_vn[row - 1] & (1u64 << (col - 1)) != 0 {
                ops.push(EditOp::new(EditKind::Insert, src_off + col, dest_off + row));
            } else {
                col -= 1;
                if s1[col] != s2[row] {
                    ops.push(EditOp::new(EditKind::Replace, src_off + col, dest_off + row));
                }
            }
        }
    }
    while col > 0 {
        col -= 1;
        ops.push(EditOp::new(EditKind::Delete, src_off + col, dest_off));
    }
    while row > 0 {
        row -= 1;
        ops.push(EditOp::new(EditKind::Insert, src_off, dest_off + row));
    }
    ops[start..].reverse();
}

/// Target of length one: keep the leftmost occurrence if there is one,
/// otherwise replace the first source character; delete everything else.
fn editops_single_target<T: HashableChar>(
    s1: &[T],
    c2: T,
    src_off: usize,
    dest_off: usize,
    ops: &mut Vec<EditOp>,
) {
    match s1.iter().position(|&c| c == c2) {
        Some(k) => {
            ops.extend((0..k).map(|i| EditOp::new(EditKind::Delete, src_off + i, dest_off)));
            ops.extend(
                (k + 1..s1.len()).map(|i| EditOp::new(EditKind::Delete, src_off + i, dest_off + 1)),
            );
        }
        None => {
            ops.push(EditOp::new(EditKind::Replace, src_off, dest_off));
            ops.extend(
                (1..s1.len()).map(|i| EditOp::new(EditKind::Delete, src_off + i, dest_off + 1)),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Editop application
// ---------------------------------------------------------------------------

/// Replay an edit script: runs of `s1` not covered by any op are copied
/// through, inserts and replaces read from `s2`. Indices must be
/// non-decreasing and in range for both sequences.
pub fn editops_apply<T: HashableChar>(
    ops: &[EditOp],
    s1: &[T],
    s2: &[T],
) -> Result<Vec<T>, InvalidEditops> {
    let mut out: Vec<T> = Vec::with_capacity(s2.len());
    let mut src_pos = 0usize;
    let mut dest_floor = 0usize;

    for (index, op) in ops.iter().enumerate() {
        if op.src_pos < src_pos {
            return Err(InvalidEditops::new(index, "source positions must be non-decreasing"));
        }
        if op.dest_pos < dest_floor {
            return Err(InvalidEditops::new(index, "destination positions must be non-decreasing"));
        }
        let (src_bound, dest_bound) = match op.kind {
            EditKind::Insert => (s1.len() + 1, s2.len()),
            EditKind::Delete => (s1.len(), s2.len() + 1),
            EditKind::Replace => (s1.len(), s2.len()),
        };
        if op.src_pos >= src_bound {
            return Err(InvalidEditops::new(index, "source position out of range"));
        }
        if op.dest_pos >= dest_bound {
            return Err(InvalidEditops::new(index, "destination position out of range"));
        }

        out.extend_from_slice(&s1[src_pos..op.src_pos]);
        src_pos = op.src_pos;
        match op.kind {
            EditKind::Insert => {
                out.push(s2[op.dest_pos]);
                dest_floor = op.dest_pos + 1;
            }
            EditKind::Delete => {
                src_pos += 1;
                dest_floor = op.dest_pos;
            }
            EditKind::Replace => {
                out.push(s2[op.dest_pos]);
                src_pos += 1;
                dest_floor = op.dest_pos + 1;
            }
        }
    }
    out.extend_from_slice(&s1[src_pos..]);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Editops <-> opcodes
// ---------------------------------------------------------------------------

pub fn editops_to_opcodes(ops: &[EditOp], src_len: usize, dest_len: usize) -> Vec<OpcodeSpan> {
    let mut result: Vec<OpcodeSpan> = Vec::new();
    let mut src_pos = 0usize;
    let mut dest_pos = 0usize;
    let mut i = 0;
    let n = ops.len();

    while i < n {
        let op = ops[i];
        if op.src_pos > src_pos || op.dest_pos > dest_pos {
            result.push(OpcodeSpan {
                kind: SpanKind::Equal,
                src_start: src_pos,
                src_end: op.src_pos,
                dest_start: dest_pos,
                dest_end: op.dest_pos,
            });
            src_pos = op.src_pos;
            dest_pos = op.dest_pos;
        }

        let src_begin = src_pos;
        let dest_begin = dest_pos;
        let kind = op.kind;
        while i < n && ops[i].kind == kind && ops[i].src_pos == src_pos && ops[i].dest_pos == dest_pos
        {
            match kind {
                EditKind::Replace => {
                    src_pos += 1;
                    dest_pos += 1;
                }
                EditKind::Insert => dest_pos += 1,
                EditKind::Delete => src_pos += 1,
            }
            i += 1;
        }
        result.push(OpcodeSpan {
            kind: kind.into(),
            src_start: src_begin,
            src_end: src_pos,
            dest_start: dest_begin,
            dest_end: dest_pos,
        });
    }

    if src_pos < src_len || dest_pos < dest_len {
        result.push(OpcodeSpan {
            kind: SpanKind::Equal,
            src_start: src_pos,
            src_end: src_len,
            dest_start: dest_pos,
            dest_end: dest_len,
        });
    }
    result
}

pub fn opcodes_to_editops(spans: &[OpcodeSpan]) -> Vec<EditOp> {
    let mut ops = Vec::new();
    for span in spans {
        match span.kind {
            SpanKind::Equal => {}
            SpanKind::Replace => {
                for i in 0..span.src_end - span.src_start {
                    ops.push(EditOp::new(
                        EditKind::Replace,
                        span.src_start + i,
                        span.dest_start + i,
                    ));
                }
            }
            SpanKind::Delete => {
                for i in 0..span.src_end - span.src_start {
                    ops.push(EditOp::new(EditKind::Delete, span.src_start + i, span.dest_start));
                }
            }
            SpanKind::Insert => {
                for j in 0..span.dest_end - span.dest_start {
                    ops.push(EditOp::new(EditKind::Insert, span.src_start, span.dest_start + j));
                }
            }
        }
    }
    ops
}

/// Equal runs of an edit script as (src, dest, length) triples, terminated by
/// the zero-length sentinel block.
pub fn editops_matching_blocks(
    ops: &[EditOp],
    src_len: usize,
    dest_len: usize,
) -> Vec<(usize, usize, usize)> {
    let mut blocks: Vec<(usize, usize, usize)> = Vec::new();
    let mut src_pos = 0usize;
    let mut dest_pos = 0usize;

    for op in ops {
        if op.src_pos > src_pos && op.dest_pos > dest_pos {
            let len = (op.src_pos - src_pos).min(op.dest_pos - dest_pos);
            if len > 0 {
                blocks.push((src_pos, dest_pos, len));
            }
        }
        match op.kind {
            EditKind::Replace => {
                src_pos = op.src_pos + 1;
                dest_pos = op.dest_pos + 1;
            }
            EditKind::Delete => {
                src_pos = op.src_pos + 1;
                dest_pos = dest_pos.max(op.dest_pos);
            }
            EditKind::Insert => {
                dest_pos = op.dest_pos + 1;
                src_pos = src_pos.max(op.src_pos);
            }
        }
    }
    if src_pos < src_len && dest_pos < dest_len {
        let len = (src_len - src_pos).min(dest_len - dest_pos);
        if len > 0 {
            blocks.push((src_pos, dest_pos, len));
        }
    }
    blocks.push((src_len, dest_len, 0));
    blocks
}

// ---------------------------------------------------------------------------
// LCS / Indel
// ---------------------------------------------------------------------------

fn lcs_length_64<T: HashableChar>(s1: &[T], s2: &[T], max_dist: Option<usize>) -> usize {
    let m = s1.len();
    let n = s2.len();
    let pm = PatternMask64::build(s1);
    let mask = if m == 64 { !0u64 } else { (1u64 << m) - 1 };

    let required_lcs = max_dist.map(|d| {
        let lensum = m + n;
        if lensum <= d { 0 } else { (lensum - d + 1) / 2 }
    });

    let mut v = !0u64;
    for (i, &c) in s2.iter().enumerate() {
        let x = pm.get(c);
        let u = v & x;
        v = v.wrapping_add(u) | (v & !x);
        if let Some(req) = required_lcs {
            let current = (!v & mask).count_ones() as usize;
            let remaining = n - 1 - i;
            if current + remaining < req {
                return 0;
            }
        }
    }
    (!v & mask).count_ones() as usize
}

fn lcs_length_multiword<T: HashableChar>(s1: &[T], s2: &[T], max_dist: Option<usize>) -> usize {
    let m = s1.len();
    let n = s2.len();
    let words = m.div_ceil(64);
    let pm = PatternMaskMulti::build(s1);

    let mut v = vec![!0u64; words];
    let mut next_v = vec![0u64; words];
    let last_bits = if m % 64 == 0 { 64 } else { m % 64 };
    let mask = if last_bits == 64 { !0u64 } else { (1u64 << last_bits) - 1 };

    let required_lcs = max_dist.map(|d| {
        let lensum = m + n;
        if lensum <= d { 0 } else { (lensum - d + 1) / 2 }
    });

    let count = |v: &[u64]| -> usize {
        let mut zeros = 0usize;
        for w in 0..words - 1 {
            zeros += (!v[w]).count_ones() as usize;
        }
        zeros + (!v[words - 1] & mask).count_ones() as usize
    };

    for (i, &c) in s2.iter().enumerate() {
        let pm_c = pm.get(c);
        let mut carry = 0u64;
        for w in 0..words {
            let x = pm_c[w];
            let u = v[w] & x;
            let sum = (v[w] as u128) + (u as u128) + (carry as u128);
            carry = (sum >> 64) as u64;
            next_v[w] = (sum as u64) | (v[w] & !x);
        }
        std::mem::swap(&mut v, &mut next_v);

        if let Some(req) = required_lcs {
            let remaining = n - 1 - i;
            if count(&v) + remaining < req {
                return 0;
            }
        }
    }
    count(&v)
}

pub fn lcs_length<T: HashableChar>(s1: &[T], s2: &[T], max_dist: Option<usize>) -> usize {
    if s1.is_empty() || s2.is_empty() {
        return 0;
    }
    if s1.len() <= 64 {
        lcs_length_64(s1, s2, max_dist)
    } else {
        lcs_length_multiword(s1, s2, max_dist)
    }
}

/// LCS against a pre-built single-word mask. Batch callers build the mask for
/// the query once and reuse it for every choice.
#[inline]
pub fn lcs_from_mask(pm: &PatternMask64<u8>, q_len: usize, s2: &[u8], max_dist: Option<usize>) -> usize {
    let mask = if q_len == 64 { !0u64 } else { (1u64 << q_len) - 1 };
    let n = s2.len();

    let required_lcs = max_dist.map(|d| {
        let lensum = q_len + n;
        if lensum <= d { 0 } else { (lensum - d + 1) / 2 }
    });

    let mut v = !0u64;
    for (i, &c) in s2.iter().enumerate() {
        let x = pm.get(c);
        let u = v & x;
        v = v.wrapping_add(u) | (v & !x);
        if let Some(req) = required_lcs {
            let current = (!v & mask).count_ones() as usize;
            let remaining = n - 1 - i;
            if current + remaining < req {
                return 0;
            }
        }
    }
    (!v & mask).count_ones() as usize
}

fn fill_histogram<T: HashableChar>(s: &[T], hist: &mut [i32; 256]) -> bool {
    for &c in s {
        match c.as_usize() {
            Some(u) => hist[u] += 1,
            None => return false,
        }
    }
    true
}

/// Insertion/deletion-only distance. Returns `cutoff + 1` once the true
/// distance provably exceeds `score_cutoff`.
pub fn indel_distance<T: HashableChar>(s1: &[T], s2: &[T], score_cutoff: Option<usize>) -> usize {
    if let Some(cutoff) = score_cutoff {
        if s1.len().abs_diff(s2.len()) > cutoff {
            return cutoff + 1;
        }
        // L1 histogram bound for narrow alphabets.
        let mut hist1 = [0i32; 256];
        let mut hist2 = [0i32; 256];
        if fill_histogram(s1, &mut hist1) && fill_histogram(s2, &mut hist2) {
            let l1: i32 = (0..256).map(|i| (hist1[i] - hist2[i]).abs()).sum();
            if l1 as usize > cutoff {
                return cutoff + 1;
            }
        }
    }

    let (s1, s2, _) = remove_common_affix(s1, s2);
    let lcs = lcs_length(s1, s2, score_cutoff);
    let dist = s1.len() + s2.len() - 2 * lcs;
    match score_cutoff {
        Some(cutoff) if dist > cutoff => cutoff + 1,
        _ => dist,
    }
}

pub fn indel_editops<T: HashableChar>(s1: &[T], s2: &[T]) -> Vec<EditOp> {
    let (t1, t2, affix) = remove_common_affix(s1, s2);
    let pfx = affix.prefix_len;
    let m = t1.len();
    let n = t2.len();

    if m == 0 {
        return (0..n).map(|j| EditOp::new(EditKind::Insert, pfx, pfx + j)).collect();
    }
    if n == 0 {
        return (0..m).map(|i| EditOp::new(EditKind::Delete, pfx + i, pfx)).collect();
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if t1[i - 1] == t2[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    let mut ops: Vec<EditOp> = Vec::new();
    let mut i = m;
    let mut j = n;
    while i > 0 && j > 0 {
        if dp[i][j] == dp[i - 1][j] {
            ops.push(EditOp::new(EditKind::Delete, pfx + i - 1, pfx + j));
            i -= 1;
        } else {
            j -= 1;
            if j > 0 && dp[i][j] > dp[i - 1][j] {
                ops.push(EditOp::new(EditKind::Insert, pfx + i, pfx + j));
            } else {
                i -= 1;
            }
        }
    }
    while i > 0 {
        ops.push(EditOp::new(EditKind::Delete, pfx + i - 1, pfx));
        i -= 1;
    }
    while j > 0 {
        j -= 1;
        ops.push(EditOp::new(EditKind::Insert, pfx, pfx + j));
    }
    ops.reverse();
    ops
}

pub fn lcs_seq_similarity<T: HashableChar>(s1: &[T], s2: &[T], max_dist: Option<usize>) -> usize {
    let (t1, t2, affix) = remove_common_affix(s1, s2);
    affix.prefix_len + affix.suffix_len + lcs_length(t1, t2, max_dist)
}

pub fn lcs_seq_distance<T: HashableChar>(s1: &[T], s2: &[T], max_dist: Option<usize>) -> usize {
    s1.len().max(s2.len()) - lcs_seq_similarity(s1, s2, max_dist)
}

// ---------------------------------------------------------------------------
// Hamming
// ---------------------------------------------------------------------------

pub fn hamming_distance<T: HashableChar>(s1: &[T], s2: &[T], pad: bool) -> usize {
    let min_len = s1.len().min(s2.len());
    let mut dist = 0usize;
    for i in 0..min_len {
        if s1[i] != s2[i] {
            dist += 1;
        }
    }
    if pad {
        dist += s1.len().max(s2.len()) - min_len;
    }
    dist
}

pub fn hamming_editops<T: HashableChar>(s1: &[T], s2: &[T]) -> Vec<EditOp> {
    let min_len = s1.len().min(s2.len());
    let mut ops = Vec::new();
    for i in 0..min_len {
        if s1[i] != s2[i] {
            ops.push(EditOp::new(EditKind::Replace, i, i));
        }
    }
    if s1.len() > s2.len() {
        ops.extend((min_len..s1.len()).map(|i| EditOp::new(EditKind::Delete, i, s2.len())));
    } else {
        ops.extend((min_len..s2.len()).map(|j| EditOp::new(EditKind::Insert, s1.len(), j)));
    }
    ops
}

// ---------------------------------------------------------------------------
// Jaro / Jaro-Winkler (natural [0, 1] scale; callers rescale)
// ---------------------------------------------------------------------------

pub fn jaro<T: HashableChar>(s1: &[T], s2: &[T]) -> f64 {
    let len1 = s1.len();
    let len2 = s2.len();

    if len1 == 0 && len2 == 0 {
        return 1.0;
    }
    if len1 == 0 || len2 == 0 {
        return 0.0;
    }

    let match_dist = (len1.max(len2) / 2).saturating_sub(1);

    let mut s1_matches = vec![false; len1];
    let mut s2_matches = vec![false; len2];
    let mut matches = 0usize;

    for i in 0..len1 {
        let start = i.saturating_sub(match_dist);
        let end = (i + match_dist + 1).min(len2);
        for j in start..end {
            if s2_matches[j] || s1[i] != s2[j] {
                continue;
            }
            s1_matches[i] = true;
            s2_matches[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    let mut transpositions = 0usize;
    let mut k = 0;
    for i in 0..len1 {
        if !s1_matches[i] {
            continue;
        }
        while !s2_matches[k] {
            k += 1;
        }
        if s1[i] != s2[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    let t = (transpositions / 2) as f64;
    (m / len1 as f64 + m / len2 as f64 + (m - t) / m) / 3.0
}

pub fn jaro_winkler<T: HashableChar>(s1: &[T], s2: &[T], prefix_weight: f64) -> f64 {
    let jaro_score = jaro(s1, s2);
    if jaro_score < 0.7 {
        return jaro_score;
    }
    let prefix_len = s1
        .iter()
        .zip(s2.iter())
        .take(4)
        .take_while(|(a, b)| a == b)
        .count() as f64;
    (jaro_score + prefix_len * prefix_weight * (1.0 - jaro_score)).min(1.0)
}

// ---------------------------------------------------------------------------
// Prefix / Postfix
// ---------------------------------------------------------------------------

pub fn prefix_similarity<T: HashableChar>(s1: &[T], s2: &[T]) -> usize {
    common_prefix(s1, s2)
}

pub fn prefix_distance<T: HashableChar>(s1: &[T], s2: &[T]) -> usize {
    s1.len().max(s2.len()) - prefix_similarity(s1, s2)
}

pub fn postfix_similarity<T: HashableChar>(s1: &[T], s2: &[T]) -> usize {
    common_suffix(s1, s2)
}

pub fn postfix_distance<T: HashableChar>(s1: &[T], s2: &[T]) -> usize {
    s1.len().max(s2.len()) - postfix_similarity(s1, s2)
}

// ---------------------------------------------------------------------------
// Sliding-window partial match (used by the ratio layer)
// ---------------------------------------------------------------------------

/// Best indel score of `needle` against any window of `haystack`, for ASCII
/// needles of at most 64 units. The needle mask is built once and every
/// full-length window plus every shorter suffix window is scored with the
/// bit-parallel LCS recurrence.
pub fn partial_ratio_ascii_fast(needle: &[u8], haystack: &[u8]) -> f64 {
    let m = needle.len();
    let n = haystack.len();

    if m == 0 {
        return if n == 0 { 100.0 } else { 0.0 };
    }
    if n < m {
        return 0.0;
    }

    // Verbatim occurrence is a perfect window; no mask needed.
    if haystack.windows(m).any(|w| w == needle) {
        return 100.0;
    }

    let pm = PatternMask64::build(needle);
    let mask = if m == 64 { !0u64 } else { (1u64 << m) - 1 };
    let lensum = 2 * m;

    let mut best_score = 0.0f64;
    for start in 0..=n - m {
        let mut v = !0u64;
        for &c in &haystack[start..start + m] {
            let x = pm.get(c);
            let u = v & x;
            v = v.wrapping_add(u) | (v & !x);
        }
        let lcs = (!v & mask).count_ones() as usize;
        let dist = 2 * m - 2 * lcs;
        let score = (1.0 - dist as f64 / lensum as f64) * 100.0;
        if score > best_score {
            best_score = score;
        }
    }

    // Suffix windows shorter than the needle.
    for wlen in (1..m).rev() {
        let window = &haystack[n - wlen..];
        let mut v = !0u64;
        for &c in window {
            let x = pm.get(c);
            let u = v & x;
            v = v.wrapping_add(u) | (v & !x);
        }
        let lcs = (!v & mask).count_ones() as usize;
        let ls = m + wlen;
        let dist = ls - 2 * lcs;
        let score = (1.0 - dist as f64 / ls as f64) * 100.0;
        if score > best_score {
            best_score = score;
        }
    }

    best_score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(s: &str) -> &[u8] {
        s.as_bytes()
    }

    fn dist(s1: &str, s2: &str) -> usize {
        levenshtein(b(s1), b(s2), (1, 1, 1), None)
    }

    fn ops_of(s1: &str, s2: &str) -> Vec<EditOp> {
        levenshtein_editops(b(s1), b(s2))
    }

    fn apply_str(ops: &[EditOp], s1: &str, s2: &str) -> String {
        let out = editops_apply(ops, b(s1), b(s2)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn kitten_sitting() {
        assert_eq!(dist("kitten", "sitting"), 3);
        let ops = ops_of("kitten", "sitting");
        assert_eq!(
            ops,
            vec![
                EditOp::new(EditKind::Replace, 0, 0),
                EditOp::new(EditKind::Replace, 4, 4),
                EditOp::new(EditKind::Insert, 6, 6),
            ]
        );
        assert_eq!(apply_str(&ops, "kitten", "sitting"), "sitting");
    }

    #[test]
    fn both_empty() {
        assert_eq!(dist("", ""), 0);
        assert!(ops_of("", "").is_empty());
        assert_eq!(levenshtein_normalized_similarity(b(""), b(""), (1, 1, 1), None), 100.0);
    }

    #[test]
    fn delete_everything() {
        assert_eq!(dist("abc", ""), 3);
        let ops = ops_of("abc", "");
        assert_eq!(
            ops,
            vec![
                EditOp::new(EditKind::Delete, 0, 0),
                EditOp::new(EditKind::Delete, 1, 0),
                EditOp::new(EditKind::Delete, 2, 0),
            ]
        );
        assert_eq!(apply_str(&ops, "abc", ""), "");
    }

    #[test]
    fn insert_everything() {
        assert_eq!(dist("", "abc"), 3);
        let ops = ops_of("", "abc");
        assert_eq!(ops.len(), 3);
        assert!(ops.iter().all(|op| op.kind == EditKind::Insert));
        assert_eq!(apply_str(&ops, "", "abc"), "abc");
    }

    #[test]
    fn flaw_lawn() {
        assert_eq!(dist("flaw", "lawn"), 2);
        let ops = ops_of("flaw", "lawn");
        assert_eq!(ops.len(), 2);
        assert_eq!(apply_str(&ops, "flaw", "lawn"), "lawn");
    }

    #[test]
    fn same_sequence_as_both_arguments() {
        let s = "deterministic";
        assert_eq!(dist(s, s), 0);
        assert!(ops_of(s, s).is_empty());
    }

    #[test]
    fn cutoff_sentinel_and_exact() {
        // True distance is 6.
        assert_eq!(levenshtein(b("abcdef"), b("uvwxyz"), (1, 1, 1), Some(3)), 4);
        assert_eq!(levenshtein(b("abcdef"), b("uvwxyz"), (1, 1, 1), Some(6)), 6);
        assert_eq!(levenshtein(b("abcdef"), b("uvwxyz"), (1, 1, 1), Some(10)), 6);
        // Length difference alone can exceed the cutoff.
        assert_eq!(levenshtein(b("a"), b("aaaaaa"), (1, 1, 1), Some(2)), 3);
        assert_eq!(levenshtein(b(""), b("xyz"), (1, 1, 1), Some(1)), 2);
    }

    #[test]
    fn affix_invariance() {
        let d_inner = dist("flaw", "lawn");
        assert_eq!(dist("xxflawyy", "xxlawnyy"), d_inner);
        let long_wrap = format!("{}flaw{}", "p".repeat(80), "q".repeat(80));
        let long_wrap2 = format!("{}lawn{}", "p".repeat(80), "q".repeat(80));
        assert_eq!(dist(&long_wrap, &long_wrap2), d_inner);
    }

    #[test]
    fn multiword_distance() {
        // 100 identical units against 50 identical + 50 different: the affix
        // trim leaves a 50 vs 100-unit problem for the multi-word kernel.
        let s1 = "a".repeat(100);
        let s2 = format!("{}{}", "a".repeat(50), "b".repeat(50));
        assert_eq!(dist(&s1, &s2), 50);

        let s3 = "ab".repeat(40); // 80 units, no common affix with s4
        let s4 = "ba".repeat(40);
        let d = dist(&s3, &s4);
        assert_eq!(d, 2);
        assert_eq!(dist(&s4, &s3), d);
    }

    #[test]
    fn word_width_boundaries() {
        for len in [63usize, 64, 65, 128, 129] {
            let s1: Vec<u8> = (0..len).map(|i| (i % 7) as u8 + b'a').collect();
            let mut s2 = s1.clone();
            s2[0] = b'z';
            s2[len / 2] = b'z';
            let d = levenshtein(&s1, &s2, (1, 1, 1), None);
            assert_eq!(d, 2, "len {len}");
            let ops = levenshtein_editops(&s1, &s2);
            assert_eq!(ops.len(), d, "len {len}");
            assert_eq!(editops_apply(&ops, &s1, &s2).unwrap(), s2, "len {len}");
        }
    }

    #[test]
    fn long_doubling_roundtrip() {
        let s1 = "ab".repeat(512);
        let s2 = "ba".repeat(512);
        let d = dist(&s1, &s2);
        let ops = ops_of(&s1, &s2);
        assert_eq!(ops.len(), d);
        assert_eq!(apply_str(&ops, &s1, &s2), s2);
    }

    #[test]
    fn divide_step_roundtrip() {
        // > 64 source units with scattered edits forces the divide path.
        let s1: Vec<u8> = (0..200).map(|i| (i % 11) as u8 + b'a').collect();
        let mut s2: Vec<u8> = s1.clone();
        s2.remove(5);
        s2.insert(40, b'x');
        s2[100] = b'y';
        s2.remove(150);
        let d = levenshtein(&s1, &s2, (1, 1, 1), None);
        let ops = levenshtein_editops(&s1, &s2);
        assert_eq!(ops.len(), d);
        assert_eq!(editops_apply(&ops, &s1, &s2).unwrap(), s2);
    }

    #[test]
    fn single_unit_target() {
        // 'c' occurs in the source, so everything around its first occurrence
        // is deleted; neither end matches, so no affix is trimmed away.
        let s1: Vec<u8> = (0..150).map(|i| (i % 13) as u8 + b'a').collect();
        let s2: Vec<u8> = vec![b'c'];
        let d = levenshtein(&s1, &s2, (1, 1, 1), None);
        assert_eq!(d, 149);
        let ops = levenshtein_editops(&s1, &s2);
        assert_eq!(ops.len(), d);
        assert_eq!(editops_apply(&ops, &s1, &s2).unwrap(), s2);

        // '!' does not occur: one replace plus deletes.
        let s3: Vec<u8> = vec![b'!'];
        let ops = levenshtein_editops(&s1, &s3);
        assert_eq!(ops.len(), 150);
        assert_eq!(editops_apply(&ops, &s1, &s3).unwrap(), s3);
    }

    #[test]
    fn wider_code_units() {
        let s1: Vec<u32> = "süß".chars().map(|c| c as u32).collect();
        let s2: Vec<u32> = "sss".chars().map(|c| c as u32).collect();
        assert_eq!(levenshtein(&s1, &s2, (1, 1, 1), None), 2);

        let s3: Vec<u16> = vec![0x0041, 0x2603, 0x0042];
        let s4: Vec<u16> = vec![0x0041, 0x0042];
        assert_eq!(levenshtein(&s3, &s4, (1, 1, 1), None), 1);
        let ops = levenshtein_editops(&s3, &s4);
        assert_eq!(ops.len(), 1);
        assert_eq!(editops_apply(&ops, &s3, &s4).unwrap(), s4);
    }

    #[test]
    fn weighted_distances() {
        // Replace costs 2: substitution is never cheaper than delete + insert.
        assert_eq!(levenshtein(b("kitten"), b("sitting"), (1, 1, 2), None), 5);
        assert_eq!(levenshtein(b("abc"), b(""), (1, 3, 1), None), 9);
        assert_eq!(levenshtein(b(""), b("abc"), (4, 1, 1), None), 12);
        assert_eq!(levenshtein_maximum(6, 7, (1, 1, 1)), 7);
    }

    #[test]
    fn normalized_scores() {
        let ns = levenshtein_normalized_similarity(b("kitten"), b("sitten"), (1, 1, 1), None);
        assert!((ns - 100.0 * 5.0 / 6.0).abs() < 1e-9);
        assert_eq!(levenshtein_normalized_similarity(b("abc"), b("abc"), (1, 1, 1), None), 100.0);
        assert_eq!(levenshtein_normalized_similarity(b("abc"), b("xyz"), (1, 1, 1), None), 0.0);
        // Below the cutoff the score collapses to zero.
        assert_eq!(
            levenshtein_normalized_similarity(b("kitten"), b("sitten"), (1, 1, 1), Some(90.0)),
            0.0
        );
        let nd = levenshtein_normalized_distance(b("kitten"), b("sitten"), (1, 1, 1), None);
        assert!((nd - 100.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn similarity_scores() {
        assert_eq!(levenshtein_similarity(b("kitten"), b("sitting"), (1, 1, 1), None), 4);
        assert_eq!(levenshtein_similarity(b("kitten"), b("sitting"), (1, 1, 1), Some(5)), 0);
    }

    #[test]
    fn apply_rejects_bad_scripts() {
        let s1 = b("abcd");
        let s2 = b("abed");
        let backwards = vec![
            EditOp::new(EditKind::Replace, 2, 2),
            EditOp::new(EditKind::Replace, 1, 1),
        ];
        let err = editops_apply(&backwards, s1, s2).unwrap_err();
        assert_eq!(err.index, 1);

        let out_of_range = vec![EditOp::new(EditKind::Delete, 9, 0)];
        assert!(editops_apply(&out_of_range, s1, s2).is_err());

        let dest_out_of_range = vec![EditOp::new(EditKind::Insert, 0, 9)];
        assert!(editops_apply(&dest_out_of_range, s1, s2).is_err());
    }

    #[test]
    fn opcode_conversion_roundtrip() {
        let ops = ops_of("kitten", "sitting");
        let spans = editops_to_opcodes(&ops, 6, 7);
        assert_eq!(
            spans,
            vec![
                OpcodeSpan { kind: SpanKind::Replace, src_start: 0, src_end: 1, dest_start: 0, dest_end: 1 },
                OpcodeSpan { kind: SpanKind::Equal, src_start: 1, src_end: 4, dest_start: 1, dest_end: 4 },
                OpcodeSpan { kind: SpanKind::Replace, src_start: 4, src_end: 5, dest_start: 4, dest_end: 5 },
                OpcodeSpan { kind: SpanKind::Equal, src_start: 5, src_end: 6, dest_start: 5, dest_end: 6 },
                OpcodeSpan { kind: SpanKind::Insert, src_start: 6, src_end: 6, dest_start: 6, dest_end: 7 },
            ]
        );
        assert_eq!(opcodes_to_editops(&spans), ops);
    }

    #[test]
    fn matching_blocks_of_kitten() {
        let ops = ops_of("kitten", "sitting");
        let blocks = editops_matching_blocks(&ops, 6, 7);
        assert_eq!(blocks, vec![(1, 1, 3), (5, 5, 1), (6, 7, 0)]);
    }

    #[test]
    fn indel_and_lcs() {
        assert_eq!(indel_distance(b("abc"), b("abc"), None), 0);
        assert_eq!(indel_distance(b("kitten"), b("sitting"), None), 5);
        assert_eq!(lcs_length(b("kitten"), b("sitting"), None), 4);
        assert_eq!(lcs_seq_similarity(b("kitten"), b("sitting"), None), 4);
        assert_eq!(lcs_seq_distance(b("kitten"), b("sitting"), None), 3);
        assert_eq!(indel_distance(b("abcdef"), b("uvwxyz"), Some(3)), 4);

        let ops = indel_editops(b("kitten"), b("sitting"));
        assert_eq!(ops.len(), 5);
        assert_eq!(editops_apply(&ops, b("kitten"), b("sitting")).unwrap(), b("sitting"));
    }

    #[test]
    fn indel_multiword() {
        let s1 = "ab".repeat(70);
        let s2 = "ba".repeat(70);
        let lcs = lcs_length(b(&s1), b(&s2), None);
        assert_eq!(lcs, 139);
        assert_eq!(indel_distance(b(&s1), b(&s2), None), 2 * 140 - 2 * lcs);
    }

    #[test]
    fn hamming() {
        assert_eq!(hamming_distance(b("karolin"), b("kathrin"), true), 3);
        assert_eq!(hamming_distance(b("abc"), b("abcde"), true), 2);
        assert_eq!(hamming_distance(b("abc"), b("abcde"), false), 0);
        let ops = hamming_editops(b("karolin"), b("kathrin"));
        assert_eq!(ops.len(), 3);
        assert_eq!(editops_apply(&ops, b("karolin"), b("kathrin")).unwrap(), b("kathrin"));
        let ops = hamming_editops(b("abcde"), b("abc"));
        assert_eq!(editops_apply(&ops, b("abcde"), b("abc")).unwrap(), b("abc"));
    }

    #[test]
    fn jaro_family() {
        assert_eq!(jaro(b(""), b("")), 1.0);
        assert_eq!(jaro(b("abc"), b("")), 0.0);
        assert_eq!(jaro(b("abc"), b("abc")), 1.0);
        let j = jaro(b("martha"), b("marhta"));
        assert!((j - 0.944444).abs() < 1e-4);
        let jw = jaro_winkler(b("martha"), b("marhta"), 0.1);
        assert!((jw - 0.961111).abs() < 1e-4);
    }

    #[test]
    fn prefix_postfix() {
        assert_eq!(prefix_similarity(b("prefix"), b("pretext")), 3);
        assert_eq!(prefix_distance(b("prefix"), b("pretext")), 4);
        assert_eq!(postfix_similarity(b("walking"), b("talking")), 6);
        assert_eq!(postfix_distance(b("walking"), b("talking")), 1);
    }

    #[test]
    fn partial_window_scores() {
        assert_eq!(partial_ratio_ascii_fast(b("abc"), b("xxabcxx")), 100.0);
        let score = partial_ratio_ascii_fast(b("001"), b("220222"));
        assert!((score - 100.0 / 3.0).abs() < 1e-6);
        assert_eq!(partial_ratio_ascii_fast(b(""), b("")), 100.0);
        assert_eq!(partial_ratio_ascii_fast(b(""), b("abc")), 0.0);
    }
}
