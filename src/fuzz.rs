use pyo3::prelude::*;

use crate::algorithms as alg;
use crate::dispatch_seq;
use crate::distance::initialize::ScoreAlignment;
use crate::types::{extract_sequence, get_processed_args, is_missing, Seq};

fn score_cutoff_check(score: f64, cutoff: Option<f64>) -> f64 {
    match cutoff {
        Some(c) if score < c => 0.0,
        _ => score,
    }
}

// ---------------------------------------------------------------------------
// Pure scorers. The Python wrappers below and the batch layer in process.rs
// share these.
// ---------------------------------------------------------------------------

pub(crate) fn ratio_impl(av: &Seq<'_>, bv: &Seq<'_>, score_cutoff: Option<f64>) -> f64 {
    let lensum = av.len() + bv.len();
    if lensum == 0 {
        return 100.0;
    }
    let max_dist = score_cutoff
        .map(|c| (lensum as f64 * (1.0 - c.min(100.0) / 100.0)).floor() as usize);
    let dist = dispatch_seq!(alg::indel_distance, av, bv, max_dist);
    if let Some(md) = max_dist {
        if dist > md {
            return 0.0;
        }
    }
    (1.0 - dist as f64 / lensum as f64) * 100.0
}

fn ratio_str(s1: &str, s2: &str) -> f64 {
    if s1.is_ascii() && s2.is_ascii() {
        return ratio_impl(&Seq::Ascii(s1.as_bytes()), &Seq::Ascii(s2.as_bytes()), None);
    }
    let av: Vec<u32> = s1.chars().map(|c| c as u32).collect();
    let bv: Vec<u32> = s2.chars().map(|c| c as u32).collect();
    ratio_impl(&Seq::U32(av), &Seq::U32(bv), None)
}

// -- tokenization ------------------------------------------------------------

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

fn tokens_sort_key(s: &str) -> String {
    sorted_tokens(s).join(" ")
}

/// Sort-merge set decomposition: (intersection, s1-only, s2-only), each
/// deduplicated and sorted.
fn set_decomposition<'a>(s1: &'a str, s2: &'a str) -> (Vec<&'a str>, Vec<&'a str>, Vec<&'a str>) {
    let mut t1 = sorted_tokens(s1);
    t1.dedup();
    let mut t2 = sorted_tokens(s2);
    t2.dedup();

    let mut intersection = Vec::new();
    let mut diff1 = Vec::new();
    let mut diff2 = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < t1.len() && j < t2.len() {
        match t1[i].cmp(t2[j]) {
            std::cmp::Ordering::Equal => {
                intersection.push(t1[i]);
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => {
                diff1.push(t1[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                diff2.push(t2[j]);
                j += 1;
            }
        }
    }
    diff1.extend_from_slice(&t1[i..]);
    diff2.extend_from_slice(&t2[j..]);
    (intersection, diff1, diff2)
}

fn joined_with_base(base: &str, diff: &[&str]) -> String {
    if diff.is_empty() {
        base.to_string()
    } else if base.is_empty() {
        diff.join(" ")
    } else {
        format!("{} {}", base, diff.join(" "))
    }
}

// -- partial ratio -----------------------------------------------------------

fn partial_ratio_short_long(shorter: &[u64], longer: &[u64]) -> (f64, usize, usize) {
    let s_len = shorter.len();
    let l_len = longer.len();
    if s_len == 0 {
        return if l_len == 0 { (100.0, 0, 0) } else { (0.0, 0, 0) };
    }
    if l_len == 0 {
        return (0.0, 0, 0);
    }

    let mut best_score = 0.0f64;
    let mut best_start = 0usize;
    let mut best_end = 0usize;

    let score_window = |window: &[u64]| -> f64 {
        let dist = alg::indel_distance(shorter, window, None);
        let lensum = s_len + window.len();
        (1.0 - dist as f64 / lensum as f64) * 100.0
    };

    // Prefix windows shorter than the needle.
    for end in 1..s_len.min(l_len) {
        let score = score_window(&longer[..end]);
        if score > best_score {
            (best_score, best_start, best_end) = (score, 0, end);
            if best_score == 100.0 {
                return (best_score, best_start, best_end);
            }
        }
    }

    // Full-length windows.
    let last_start = l_len.saturating_sub(s_len);
    for start in 0..=last_start {
        let end = (start + s_len).min(l_len);
        let score = score_window(&longer[start..end]);
        if score > best_score {
            (best_score, best_start, best_end) = (score, start, end);
            if best_score == 100.0 {
                return (best_score, best_start, best_end);
            }
        }
    }

    // Suffix windows shorter than the needle.
    for start in last_start + 1..l_len {
        let score = score_window(&longer[start..]);
        if score > best_score {
            (best_score, best_start, best_end) = (score, start, l_len);
            if best_score == 100.0 {
                return (best_score, best_start, best_end);
            }
        }
    }

    (best_score, best_start, best_end)
}

pub(crate) fn partial_ratio_impl(av: &Seq<'_>, bv: &Seq<'_>) -> f64 {
    if av.is_empty() && bv.is_empty() {
        return 100.0;
    }
    if let (Seq::Ascii(a), Seq::Ascii(b)) = (av, bv) {
        let (needle, haystack) = if a.len() <= b.len() { (*a, *b) } else { (*b, *a) };
        if needle.len() <= 64 {
            return alg::partial_ratio_ascii_fast(needle, haystack);
        }
    }
    if av.len() <= bv.len() {
        let mut score = partial_ratio_short_long(&av.to_u64(), &bv.to_u64()).0;
        if score != 100.0 && av.len() == bv.len() {
            score = score.max(partial_ratio_short_long(&bv.to_u64(), &av.to_u64()).0);
        }
        score
    } else {
        partial_ratio_short_long(&bv.to_u64(), &av.to_u64()).0
    }
}

fn partial_ratio_str(s1: &str, s2: &str) -> f64 {
    if s1.is_ascii() && s2.is_ascii() {
        let (needle, haystack) = if s1.len() <= s2.len() { (s1, s2) } else { (s2, s1) };
        if needle.len() <= 64 {
            return alg::partial_ratio_ascii_fast(needle.as_bytes(), haystack.as_bytes());
        }
    }
    let sv1: Vec<u64> = s1.chars().map(|c| c as u64).collect();
    let sv2: Vec<u64> = s2.chars().map(|c| c as u64).collect();
    if sv1.len() <= sv2.len() {
        partial_ratio_short_long(&sv1, &sv2).0
    } else {
        partial_ratio_short_long(&sv2, &sv1).0
    }
}

// -- token scorers -----------------------------------------------------------

pub(crate) fn token_sort_ratio_impl(s1: &str, s2: &str) -> f64 {
    ratio_str(&tokens_sort_key(s1), &tokens_sort_key(s2))
}

pub(crate) fn token_set_ratio_impl(s1: &str, s2: &str) -> f64 {
    let (intersect, diff1, diff2) = set_decomposition(s1, s2);
    if intersect.is_empty() && diff1.is_empty() && diff2.is_empty() {
        return 0.0;
    }
    let t0 = intersect.join(" ");
    let t1 = joined_with_base(&t0, &diff1);
    let t2 = joined_with_base(&t0, &diff2);
    if intersect.is_empty() {
        ratio_str(&t1, &t2)
    } else {
        ratio_str(&t0, &t1)
            .max(ratio_str(&t0, &t2))
            .max(ratio_str(&t1, &t2))
    }
}

pub(crate) fn token_ratio_impl(s1: &str, s2: &str, score_cutoff: Option<f64>) -> f64 {
    let tsr = token_sort_ratio_impl(s1, s2);
    if tsr == 100.0 {
        return 100.0;
    }
    let _ = score_cutoff;
    tsr.max(token_set_ratio_impl(s1, s2))
}

pub(crate) fn partial_token_sort_ratio_impl(s1: &str, s2: &str) -> f64 {
    partial_ratio_str(&tokens_sort_key(s1), &tokens_sort_key(s2))
}

pub(crate) fn partial_token_set_ratio_impl(s1: &str, s2: &str) -> f64 {
    let (intersect, diff1, diff2) = set_decomposition(s1, s2);
    if intersect.is_empty() && diff1.is_empty() && diff2.is_empty() {
        return 0.0;
    }
    // Any shared word is a perfect partial alignment.
    if !intersect.is_empty() {
        return 100.0;
    }
    partial_ratio_str(&diff1.join(" "), &diff2.join(" "))
}

pub(crate) fn partial_token_ratio_impl(s1: &str, s2: &str, score_cutoff: Option<f64>) -> f64 {
    let _ = score_cutoff;
    let ptsr = partial_token_sort_ratio_impl(s1, s2);
    if ptsr == 100.0 {
        return 100.0;
    }
    ptsr.max(partial_token_set_ratio_impl(s1, s2))
}

pub(crate) fn wratio_impl(av: &Seq<'_>, bv: &Seq<'_>, score_cutoff: Option<f64>) -> f64 {
    if av.is_empty() || bv.is_empty() {
        return 0.0;
    }

    const UNBASE_SCALE: f64 = 0.95;
    let mut sc = score_cutoff.unwrap_or(0.0);
    let len_ratio = av.len().max(bv.len()) as f64 / av.len().min(bv.len()) as f64;

    let mut end_ratio = ratio_impl(av, bv, score_cutoff);
    if end_ratio == 100.0 {
        return end_ratio;
    }

    let s1 = av.to_string_lossy();
    let s2 = bv.to_string_lossy();

    if len_ratio < 1.5 {
        sc = sc.max(end_ratio) / UNBASE_SCALE;
        let tr = token_ratio_impl(&s1, &s2, Some(sc));
        if tr > 0.0 {
            end_ratio = end_ratio.max(tr * UNBASE_SCALE);
        }
    } else {
        let partial_scale: f64 = if len_ratio <= 8.0 { 0.9 } else { 0.6 };

        sc = sc.max(end_ratio) / partial_scale;
        let pr = partial_ratio_impl(av, bv);
        end_ratio = end_ratio.max(pr * partial_scale);
        if end_ratio == 100.0 {
            return end_ratio;
        }

        sc = sc.max(end_ratio) / UNBASE_SCALE;
        let ptr = partial_token_ratio_impl(&s1, &s2, Some(sc));
        end_ratio = end_ratio.max(ptr * UNBASE_SCALE * partial_scale);
    }

    end_ratio
}

pub(crate) fn qratio_impl(av: &Seq<'_>, bv: &Seq<'_>, score_cutoff: Option<f64>) -> f64 {
    if av.is_empty() || bv.is_empty() {
        return 0.0;
    }
    ratio_impl(av, bv, score_cutoff)
}

// ---------------------------------------------------------------------------
// Python wrappers
// ---------------------------------------------------------------------------

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn fuzz_ratio(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    Ok(score_cutoff_check(ratio_impl(&av, &bv, score_cutoff), score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn fuzz_partial_ratio(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    Ok(score_cutoff_check(partial_ratio_impl(&av, &bv), score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn fuzz_partial_ratio_alignment(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<Option<ScoreAlignment>> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(None);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;

    let alignment = if av.len() <= bv.len() {
        let (score, dest_start, dest_end) = partial_ratio_short_long(&av.to_u64(), &bv.to_u64());
        if score != 100.0 && av.len() == bv.len() {
            let (rev_score, src_start, src_end) =
                partial_ratio_short_long(&bv.to_u64(), &av.to_u64());
            if rev_score > score {
                ScoreAlignment {
                    score: rev_score,
                    src_start,
                    src_end,
                    dest_start: 0,
                    dest_end: bv.len(),
                }
            } else {
                ScoreAlignment { score, src_start: 0, src_end: av.len(), dest_start, dest_end }
            }
        } else {
            ScoreAlignment { score, src_start: 0, src_end: av.len(), dest_start, dest_end }
        }
    } else {
        let (score, src_start, src_end) = partial_ratio_short_long(&bv.to_u64(), &av.to_u64());
        ScoreAlignment { score, src_start, src_end, dest_start: 0, dest_end: bv.len() }
    };

    if score_cutoff.is_some_and(|c| alignment.score < c) {
        return Ok(None);
    }
    Ok(Some(alignment))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn fuzz_token_sort_ratio(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let t1 = extract_sequence(&a_obj)?.to_string_lossy();
    let t2 = extract_sequence(&b_obj)?.to_string_lossy();
    Ok(score_cutoff_check(token_sort_ratio_impl(&t1, &t2), score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn fuzz_token_set_ratio(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let t1 = extract_sequence(&a_obj)?.to_string_lossy();
    let t2 = extract_sequence(&b_obj)?.to_string_lossy();
    Ok(score_cutoff_check(token_set_ratio_impl(&t1, &t2), score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn fuzz_token_ratio(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let t1 = extract_sequence(&a_obj)?.to_string_lossy();
    let t2 = extract_sequence(&b_obj)?.to_string_lossy();
    Ok(score_cutoff_check(token_ratio_impl(&t1, &t2, score_cutoff), score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn fuzz_partial_token_sort_ratio(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let t1 = extract_sequence(&a_obj)?.to_string_lossy();
    let t2 = extract_sequence(&b_obj)?.to_string_lossy();
    Ok(score_cutoff_check(partial_token_sort_ratio_impl(&t1, &t2), score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn fuzz_partial_token_set_ratio(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let t1 = extract_sequence(&a_obj)?.to_string_lossy();
    let t2 = extract_sequence(&b_obj)?.to_string_lossy();
    Ok(score_cutoff_check(partial_token_set_ratio_impl(&t1, &t2), score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn fuzz_partial_token_ratio(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let t1 = extract_sequence(&a_obj)?.to_string_lossy();
    let t2 = extract_sequence(&b_obj)?.to_string_lossy();
    Ok(score_cutoff_check(partial_token_ratio_impl(&t1, &t2, score_cutoff), score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn fuzz_wratio(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    Ok(score_cutoff_check(wratio_impl(&av, &bv, score_cutoff), score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn fuzz_qratio(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    Ok(score_cutoff_check(qratio_impl(&av, &bv, score_cutoff), score_cutoff))
}
