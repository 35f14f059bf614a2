use pyo3::prelude::*;
use rayon::prelude::*;

use crate::algorithms as alg;
use crate::fuzz;
use crate::types::{extract_sequence, is_missing, OwnedSeq, Seq};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ScorerType {
    Ratio,
    QRatio,
    WRatio,
    PartialRatio,
    TokenSortRatio,
    PartialTokenSortRatio,
    TokenSetRatio,
    PartialTokenSetRatio,
    TokenRatio,
    PartialTokenRatio,
    Unknown,
}

impl ScorerType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ratio" => ScorerType::Ratio,
            "qratio" => ScorerType::QRatio,
            "wratio" => ScorerType::WRatio,
            "partial_ratio" => ScorerType::PartialRatio,
            "token_sort_ratio" => ScorerType::TokenSortRatio,
            "partial_token_sort_ratio" => ScorerType::PartialTokenSortRatio,
            "token_set_ratio" => ScorerType::TokenSetRatio,
            "partial_token_set_ratio" => ScorerType::PartialTokenSetRatio,
            "token_ratio" => ScorerType::TokenRatio,
            "partial_token_ratio" => ScorerType::PartialTokenRatio,
            _ => ScorerType::Unknown,
        }
    }
}

/// Score one pair with a built-in scorer, no Python involved.
pub(crate) fn builtin_score(
    stype: ScorerType,
    av: &Seq<'_>,
    bv: &Seq<'_>,
    score_cutoff: Option<f64>,
) -> f64 {
    match stype {
        ScorerType::Ratio => fuzz::ratio_impl(av, bv, score_cutoff),
        ScorerType::QRatio => fuzz::qratio_impl(av, bv, score_cutoff),
        ScorerType::WRatio => fuzz::wratio_impl(av, bv, score_cutoff),
        ScorerType::PartialRatio => fuzz::partial_ratio_impl(av, bv),
        ScorerType::TokenSortRatio => {
            fuzz::token_sort_ratio_impl(&av.to_string_lossy(), &bv.to_string_lossy())
        }
        ScorerType::PartialTokenSortRatio => {
            fuzz::partial_token_sort_ratio_impl(&av.to_string_lossy(), &bv.to_string_lossy())
        }
        ScorerType::TokenSetRatio => {
            fuzz::token_set_ratio_impl(&av.to_string_lossy(), &bv.to_string_lossy())
        }
        ScorerType::PartialTokenSetRatio => {
            fuzz::partial_token_set_ratio_impl(&av.to_string_lossy(), &bv.to_string_lossy())
        }
        ScorerType::TokenRatio => {
            fuzz::token_ratio_impl(&av.to_string_lossy(), &bv.to_string_lossy(), score_cutoff)
        }
        ScorerType::PartialTokenRatio => fuzz::partial_token_ratio_impl(
            &av.to_string_lossy(),
            &bv.to_string_lossy(),
            score_cutoff,
        ),
        ScorerType::Unknown => 0.0,
    }
}

pub fn execute_scorer(
    py: Python<'_>,
    stype: ScorerType,
    scorer_obj: Option<&PyObject>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    match stype {
        ScorerType::Ratio => fuzz::fuzz_ratio(py, s1, s2, processor, score_cutoff),
        ScorerType::QRatio => fuzz::fuzz_qratio(py, s1, s2, processor, score_cutoff),
        ScorerType::WRatio => fuzz::fuzz_wratio(py, s1, s2, processor, score_cutoff),
        ScorerType::PartialRatio => fuzz::fuzz_partial_ratio(py, s1, s2, processor, score_cutoff),
        ScorerType::TokenSortRatio => {
            fuzz::fuzz_token_sort_ratio(py, s1, s2, processor, score_cutoff)
        }
        ScorerType::PartialTokenSortRatio => {
            fuzz::fuzz_partial_token_sort_ratio(py, s1, s2, processor, score_cutoff)
        }
        ScorerType::TokenSetRatio => {
            fuzz::fuzz_token_set_ratio(py, s1, s2, processor, score_cutoff)
        }
        ScorerType::PartialTokenSetRatio => {
            fuzz::fuzz_partial_token_set_ratio(py, s1, s2, processor, score_cutoff)
        }
        ScorerType::TokenRatio => fuzz::fuzz_token_ratio(py, s1, s2, processor, score_cutoff),
        ScorerType::PartialTokenRatio => {
            fuzz::fuzz_partial_token_ratio(py, s1, s2, processor, score_cutoff)
        }
        ScorerType::Unknown => {
            if let Some(func) = scorer_obj {
                let kwargs = pyo3::types::PyDict::new(py);
                if let Some(proc) = processor {
                    kwargs.set_item("processor", proc)?;
                }
                if let Some(sc) = score_cutoff {
                    kwargs.set_item("score_cutoff", sc)?;
                }
                func.call(py, (s1, s2), Some(&kwargs))?.extract::<f64>(py)
            } else {
                Ok(0.0)
            }
        }
    }
}

#[pyfunction]
#[pyo3(signature = (query, choices, scorer_name, scorer_obj=None, processor=None, limit=Some(5), score_cutoff=None))]
pub fn extract(
    py: Python<'_>,
    query: &Bound<'_, PyAny>,
    choices: &Bound<'_, PyAny>,
    scorer_name: &str,
    scorer_obj: Option<PyObject>,
    processor: Option<PyObject>,
    limit: Option<usize>,
    score_cutoff: Option<f64>,
) -> PyResult<Vec<(PyObject, f64, usize)>> {
    let stype = ScorerType::from_name(scorer_name);
    let mut results: Vec<(PyObject, f64, usize)> = Vec::new();

    let native = processor.is_none() && scorer_obj.is_none() && stype != ScorerType::Unknown;

    if native && !is_missing(query) {
        let q_seq = extract_sequence(query)?;

        // For ASCII queries the histogram and the single-word pattern mask
        // are built once and reused for every choice.
        let mut q_hist = [0i32; 256];
        let mut q_mask: Option<alg::PatternMask64<u8>> = None;
        let q_len = q_seq.len();
        if let Seq::Ascii(q_bytes) = &q_seq {
            for &c in *q_bytes {
                q_hist[c as usize] += 1;
            }
            if (1..=64).contains(&q_len) {
                q_mask = Some(alg::PatternMask64::build(q_bytes));
            }
        }
        let ratio_like = matches!(stype, ScorerType::Ratio | ScorerType::QRatio);

        for (idx, choice_res) in choices.try_iter()?.enumerate() {
            let choice = choice_res?;
            if is_missing(&choice) {
                continue;
            }
            let c_seq = match extract_sequence(&choice) {
                Ok(seq) => seq,
                Err(_) => continue,
            };

            let score = if ratio_like {
                if let (Seq::Ascii(q_bytes), Seq::Ascii(c_bytes)) = (&q_seq, &c_seq) {
                    match score_ratio_ascii(
                        q_bytes,
                        c_bytes,
                        &q_hist,
                        q_mask.as_ref(),
                        score_cutoff,
                    ) {
                        Some(score) => score,
                        None => continue,
                    }
                } else {
                    builtin_score(stype, &q_seq, &c_seq, score_cutoff)
                }
            } else {
                builtin_score(stype, &q_seq, &c_seq, score_cutoff)
            };

            if score_cutoff.is_none_or(|c| score >= c) {
                results.push((choice.clone().unbind(), score, idx));
            }
        }
    } else {
        for (idx, choice_res) in choices.try_iter()?.enumerate() {
            let choice = choice_res?;
            if is_missing(&choice) {
                continue;
            }
            let score = execute_scorer(
                py,
                stype,
                scorer_obj.as_ref(),
                query,
                &choice,
                processor.as_ref().map(|p| p.clone_ref(py)),
                score_cutoff,
            )?;
            if score_cutoff.is_none_or(|c| score >= c) {
                results.push((choice.unbind(), score, idx));
            }
        }
    }

    results.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    if let Some(l) = limit {
        results.truncate(l);
    }
    Ok(results)
}

/// Indel ratio of an ASCII query/choice pair with the per-call precomputed
/// histogram and pattern mask. None means the choice cannot reach the cutoff.
fn score_ratio_ascii(
    q: &[u8],
    c: &[u8],
    q_hist: &[i32; 256],
    q_mask: Option<&alg::PatternMask64<u8>>,
    score_cutoff: Option<f64>,
) -> Option<f64> {
    let lensum = q.len() + c.len();
    if lensum == 0 {
        return Some(100.0);
    }

    let allowed_edits = score_cutoff
        .map(|co| (lensum as f64 * (1.0 - co.min(100.0) / 100.0)).max(0.0).floor() as usize);

    if let Some(max_ed) = allowed_edits {
        if q.len().abs_diff(c.len()) > max_ed {
            return None;
        }
        let mut c_hist = [0i32; 256];
        for &ch in c {
            c_hist[ch as usize] += 1;
        }
        let l1: i32 = (0..256).map(|i| (q_hist[i] - c_hist[i]).abs()).sum();
        if l1 as usize > max_ed {
            return None;
        }
    }

    let dist = match q_mask {
        Some(pm) => {
            let lcs = alg::lcs_from_mask(pm, q.len(), c, allowed_edits);
            lensum - 2 * lcs
        }
        None => alg::indel_distance(q, c, allowed_edits),
    };
    if let Some(max_ed) = allowed_edits {
        if dist > max_ed {
            return None;
        }
    }
    Some((1.0 - dist as f64 / lensum as f64) * 100.0)
}

#[pyfunction]
#[pyo3(signature = (query, choices, scorer_name, scorer_obj=None, processor=None, score_cutoff=None))]
pub fn extract_one(
    py: Python<'_>,
    query: &Bound<'_, PyAny>,
    choices: &Bound<'_, PyAny>,
    scorer_name: &str,
    scorer_obj: Option<PyObject>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<Option<(PyObject, f64, usize)>> {
    let results = extract(py, query, choices, scorer_name, scorer_obj, processor, Some(1), score_cutoff)?;
    Ok(results.into_iter().next())
}

#[pyfunction]
#[pyo3(signature = (query, choices, scorer_name, scorer_obj=None, processor=None, score_cutoff=None))]
pub fn extract_iter(
    py: Python<'_>,
    query: &Bound<'_, PyAny>,
    choices: &Bound<'_, PyAny>,
    scorer_name: &str,
    scorer_obj: Option<PyObject>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<Vec<(PyObject, f64, usize)>> {
    extract(py, query, choices, scorer_name, scorer_obj, processor, None, score_cutoff)
}

/// All-pairs score matrix. Built-in scorers release the GIL and fan out over
/// query rows with rayon; custom scorers and processors stay serial because a
/// Python callable cannot be invoked from worker threads.
#[pyfunction]
#[pyo3(signature = (queries, choices, scorer_name, scorer_obj=None, processor=None, score_cutoff=None, workers=1))]
#[allow(clippy::too_many_arguments)]
pub fn cdist(
    py: Python<'_>,
    queries: &Bound<'_, PyAny>,
    choices: &Bound<'_, PyAny>,
    scorer_name: &str,
    scorer_obj: Option<PyObject>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
    workers: i32,
) -> PyResult<Vec<Vec<f64>>> {
    let stype = ScorerType::from_name(scorer_name);

    if stype == ScorerType::Unknown || processor.is_some() {
        let queries: Vec<Bound<'_, PyAny>> =
            queries.try_iter()?.collect::<PyResult<_>>()?;
        let choices: Vec<Bound<'_, PyAny>> =
            choices.try_iter()?.collect::<PyResult<_>>()?;
        let mut matrix = Vec::with_capacity(queries.len());
        for q in &queries {
            let mut row = Vec::with_capacity(choices.len());
            for c in &choices {
                if is_missing(q) || is_missing(c) {
                    row.push(0.0);
                    continue;
                }
                let score = execute_scorer(
                    py,
                    stype,
                    scorer_obj.as_ref(),
                    q,
                    c,
                    processor.as_ref().map(|p| p.clone_ref(py)),
                    score_cutoff,
                )?;
                row.push(if score_cutoff.is_none_or(|co| score >= co) { score } else { 0.0 });
            }
            matrix.push(row);
        }
        return Ok(matrix);
    }

    let extract_owned = |obj: &Bound<'_, PyAny>| -> PyResult<Vec<Option<OwnedSeq>>> {
        let mut out = Vec::new();
        for item in obj.try_iter()? {
            let item = item?;
            if is_missing(&item) {
                out.push(None);
                continue;
            }
            out.push(extract_sequence(&item).ok().map(|seq| seq.to_owned_seq()));
        }
        Ok(out)
    };
    let q_items = extract_owned(queries)?;
    let c_items = extract_owned(choices)?;

    let score_cell = |q: &Option<OwnedSeq>, c: &Option<OwnedSeq>| -> f64 {
        match (q, c) {
            (Some(q), Some(c)) => {
                let score = builtin_score(stype, &q.as_seq(), &c.as_seq(), score_cutoff);
                if score_cutoff.is_none_or(|co| score >= co) {
                    score
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    };

    let matrix = if workers == 1 {
        q_items
            .iter()
            .map(|q| c_items.iter().map(|c| score_cell(q, c)).collect())
            .collect()
    } else {
        py.allow_threads(|| {
            q_items
                .par_iter()
                .map(|q| c_items.iter().map(|c| score_cell(q, c)).collect())
                .collect()
        })
    };
    Ok(matrix)
}
