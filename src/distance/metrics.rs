// SPDX-License-Identifier: MIT
// PyO3 wrappers for the distance metrics.
// Each function handles: processor, score_cutoff, None/NaN inputs.

use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyString};

use crate::algorithms as alg;
use crate::dispatch_seq;
use crate::distance::initialize::{Editops, Opcodes};
use crate::types::{extract_sequence, get_processed_args, is_missing, Seq};

// ---------------------------------------------------------------------------
// Score cutoff helpers
// ---------------------------------------------------------------------------

fn check_distance_cutoff(dist: usize, cutoff: Option<usize>) -> usize {
    match cutoff {
        Some(c) if dist > c => c + 1,
        _ => dist,
    }
}

fn check_similarity_cutoff(sim: usize, cutoff: Option<usize>) -> usize {
    match cutoff {
        Some(c) if sim < c => 0,
        _ => sim,
    }
}

fn check_norm_sim_cutoff(score: f64, cutoff: Option<f64>) -> f64 {
    match cutoff {
        Some(c) if score < c => 0.0,
        _ => score,
    }
}

fn check_norm_dist_cutoff(score: f64, cutoff: Option<f64>) -> f64 {
    match cutoff {
        Some(c) if score > c => 100.0,
        _ => score,
    }
}

fn missing_input_error() -> PyErr {
    PyTypeError::new_err("expected str, bytes, or sequence")
}

// ===========================================================================
// LEVENSHTEIN
// ===========================================================================

#[pyfunction]
#[pyo3(signature = (s1, s2, *, weights=None, processor=None, score_cutoff=None))]
pub fn levenshtein_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    weights: Option<(usize, usize, usize)>,
    processor: Option<PyObject>,
    score_cutoff: Option<usize>,
) -> PyResult<usize> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let w = weights.unwrap_or((1, 1, 1));
    Ok(dispatch_seq!(alg::levenshtein, &av, &bv, w, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, weights=None, processor=None, score_cutoff=None))]
pub fn levenshtein_similarity(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    weights: Option<(usize, usize, usize)>,
    processor: Option<PyObject>,
    score_cutoff: Option<usize>,
) -> PyResult<usize> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let w = weights.unwrap_or((1, 1, 1));
    Ok(dispatch_seq!(alg::levenshtein_similarity, &av, &bv, w, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, weights=None, processor=None, score_cutoff=None))]
pub fn levenshtein_normalized_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    weights: Option<(usize, usize, usize)>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(100.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let w = weights.unwrap_or((1, 1, 1));
    Ok(dispatch_seq!(alg::levenshtein_normalized_distance, &av, &bv, w, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, weights=None, processor=None, score_cutoff=None))]
pub fn levenshtein_normalized_similarity(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    weights: Option<(usize, usize, usize)>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let w = weights.unwrap_or((1, 1, 1));
    Ok(dispatch_seq!(alg::levenshtein_normalized_similarity, &av, &bv, w, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None))]
pub fn levenshtein_editops(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
) -> PyResult<Editops> {
    if is_missing(s1) || is_missing(s2) {
        return Err(missing_input_error());
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let ops = dispatch_seq!(alg::levenshtein_editops, &av, &bv);
    Ok(Editops::from_ops(ops, av.len(), bv.len()))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None))]
pub fn levenshtein_opcodes(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
) -> PyResult<Opcodes> {
    if is_missing(s1) || is_missing(s2) {
        return Err(missing_input_error());
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let ops = dispatch_seq!(alg::levenshtein_editops, &av, &bv);
    Ok(Opcodes::from_ops(ops, av.len(), bv.len()))
}

/// Replay an edit script against the two sequences it was computed from.
/// Returns str for str inputs, bytes for bytes inputs, and a list of code
/// units otherwise.
#[pyfunction]
#[pyo3(signature = (ops, s1, s2))]
pub fn editops_apply(
    py: Python<'_>,
    ops: PyRef<'_, Editops>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
) -> PyResult<PyObject> {
    let av = extract_sequence(s1)?;
    let bv = extract_sequence(s2)?;
    let out = alg::editops_apply(&ops.ops, &av.to_u64(), &bv.to_u64())
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    if s1.is_instance_of::<PyString>() && s2.is_instance_of::<PyString>() {
        let text: String = out
            .iter()
            .filter_map(|&u| u32::try_from(u).ok().and_then(char::from_u32))
            .collect();
        return Ok(PyString::new(py, &text).into_any().unbind());
    }
    if s1.is_instance_of::<PyBytes>() && s2.is_instance_of::<PyBytes>() {
        let bytes: Vec<u8> = out.iter().map(|&u| u as u8).collect();
        return Ok(PyBytes::new(py, &bytes).into_any().unbind());
    }
    Ok(out.into_pyobject(py)?.into_any().unbind())
}

// ===========================================================================
// INDEL
// ===========================================================================

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn indel_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<usize>,
) -> PyResult<usize> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    Ok(dispatch_seq!(alg::indel_distance, &av, &bv, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn indel_similarity(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<usize>,
) -> PyResult<usize> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let dist = dispatch_seq!(alg::indel_distance, &av, &bv, None);
    let max_v = av.len() + bv.len();
    Ok(check_similarity_cutoff(max_v.saturating_sub(dist), score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn indel_normalized_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(100.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let dist = dispatch_seq!(alg::indel_distance, &av, &bv, None);
    let nd = alg::normalized_distance(dist, av.len() + bv.len());
    Ok(check_norm_dist_cutoff(nd, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn indel_normalized_similarity(
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
    let max_v = av.len() + bv.len();
    let max_dist = score_cutoff.map(|c| (max_v as f64 * (1.0 - c / 100.0)).floor() as usize);
    let dist = dispatch_seq!(alg::indel_distance, &av, &bv, max_dist);
    if let Some(md) = max_dist {
        if dist > md {
            return Ok(0.0);
        }
    }
    Ok(check_norm_sim_cutoff(alg::normalized_similarity(dist, max_v), score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None))]
pub fn indel_editops(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
) -> PyResult<Editops> {
    if is_missing(s1) || is_missing(s2) {
        return Err(missing_input_error());
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let ops = dispatch_seq!(alg::indel_editops, &av, &bv);
    Ok(Editops::from_ops(ops, av.len(), bv.len()))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None))]
pub fn indel_opcodes(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
) -> PyResult<Opcodes> {
    if is_missing(s1) || is_missing(s2) {
        return Err(missing_input_error());
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let ops = dispatch_seq!(alg::indel_editops, &av, &bv);
    Ok(Opcodes::from_ops(ops, av.len(), bv.len()))
}

// ===========================================================================
// HAMMING
// ===========================================================================

fn hamming_check_lengths(len1: usize, len2: usize, pad: bool) -> PyResult<()> {
    if !pad && len1 != len2 {
        return Err(PyValueError::new_err("Sequences are not the same length."));
    }
    Ok(())
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, pad=true, processor=None, score_cutoff=None))]
pub fn hamming_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    pad: bool,
    processor: Option<PyObject>,
    score_cutoff: Option<usize>,
) -> PyResult<usize> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    hamming_check_lengths(av.len(), bv.len(), pad)?;
    let dist = dispatch_seq!(alg::hamming_distance, &av, &bv, pad);
    Ok(check_distance_cutoff(dist, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, pad=true, processor=None, score_cutoff=None))]
pub fn hamming_similarity(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    pad: bool,
    processor: Option<PyObject>,
    score_cutoff: Option<usize>,
) -> PyResult<usize> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    hamming_check_lengths(av.len(), bv.len(), pad)?;
    let dist = dispatch_seq!(alg::hamming_distance, &av, &bv, pad);
    let max_v = av.len().max(bv.len());
    Ok(check_similarity_cutoff(max_v.saturating_sub(dist), score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, pad=true, processor=None, score_cutoff=None))]
pub fn hamming_normalized_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    pad: bool,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(100.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    hamming_check_lengths(av.len(), bv.len(), pad)?;
    let dist = dispatch_seq!(alg::hamming_distance, &av, &bv, pad);
    let nd = alg::normalized_distance(dist, av.len().max(bv.len()));
    Ok(check_norm_dist_cutoff(nd, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, pad=true, processor=None, score_cutoff=None))]
pub fn hamming_normalized_similarity(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    pad: bool,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    hamming_check_lengths(av.len(), bv.len(), pad)?;
    let dist = dispatch_seq!(alg::hamming_distance, &av, &bv, pad);
    let ns = alg::normalized_similarity(dist, av.len().max(bv.len()));
    Ok(check_norm_sim_cutoff(ns, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, pad=true, processor=None))]
pub fn hamming_editops(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    pad: bool,
    processor: Option<PyObject>,
) -> PyResult<Editops> {
    if is_missing(s1) || is_missing(s2) {
        return Err(missing_input_error());
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    hamming_check_lengths(av.len(), bv.len(), pad)?;
    let ops = dispatch_seq!(alg::hamming_editops, &av, &bv);
    Ok(Editops::from_ops(ops, av.len(), bv.len()))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, pad=true, processor=None))]
pub fn hamming_opcodes(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    pad: bool,
    processor: Option<PyObject>,
) -> PyResult<Opcodes> {
    if is_missing(s1) || is_missing(s2) {
        return Err(missing_input_error());
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    hamming_check_lengths(av.len(), bv.len(), pad)?;
    let ops = dispatch_seq!(alg::hamming_editops, &av, &bv);
    Ok(Opcodes::from_ops(ops, av.len(), bv.len()))
}

// ===========================================================================
// LCSseq
// ===========================================================================

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn lcs_seq_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<usize>,
) -> PyResult<usize> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let dist = dispatch_seq!(alg::lcs_seq_distance, &av, &bv, None);
    Ok(check_distance_cutoff(dist, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn lcs_seq_similarity(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<usize>,
) -> PyResult<usize> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let sim = dispatch_seq!(alg::lcs_seq_similarity, &av, &bv, None);
    Ok(check_similarity_cutoff(sim, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn lcs_seq_normalized_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(100.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let dist = dispatch_seq!(alg::lcs_seq_distance, &av, &bv, None);
    let nd = alg::normalized_distance(dist, av.len().max(bv.len()));
    Ok(check_norm_dist_cutoff(nd, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn lcs_seq_normalized_similarity(
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
    let dist = dispatch_seq!(alg::lcs_seq_distance, &av, &bv, None);
    let ns = alg::normalized_similarity(dist, av.len().max(bv.len()));
    Ok(check_norm_sim_cutoff(ns, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None))]
pub fn lcs_seq_editops(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
) -> PyResult<Editops> {
    if is_missing(s1) || is_missing(s2) {
        return Err(missing_input_error());
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let ops = dispatch_seq!(alg::indel_editops, &av, &bv);
    Ok(Editops::from_ops(ops, av.len(), bv.len()))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None))]
pub fn lcs_seq_opcodes(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
) -> PyResult<Opcodes> {
    if is_missing(s1) || is_missing(s2) {
        return Err(missing_input_error());
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let ops = dispatch_seq!(alg::indel_editops, &av, &bv);
    Ok(Opcodes::from_ops(ops, av.len(), bv.len()))
}

// ===========================================================================
// JARO / JARO-WINKLER
// ===========================================================================

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn jaro_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(100.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let dist = 100.0 * (1.0 - dispatch_seq!(alg::jaro, &av, &bv));
    Ok(check_norm_dist_cutoff(dist, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn jaro_similarity(
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
    let sim = 100.0 * dispatch_seq!(alg::jaro, &av, &bv);
    Ok(check_norm_sim_cutoff(sim, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn jaro_normalized_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    jaro_distance(py, s1, s2, processor, score_cutoff)
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn jaro_normalized_similarity(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    jaro_similarity(py, s1, s2, processor, score_cutoff)
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, prefix_weight=0.1, processor=None, score_cutoff=None))]
pub fn jaro_winkler_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    prefix_weight: f64,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(100.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let dist = 100.0 * (1.0 - dispatch_seq!(alg::jaro_winkler, &av, &bv, prefix_weight));
    Ok(check_norm_dist_cutoff(dist, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, prefix_weight=0.1, processor=None, score_cutoff=None))]
pub fn jaro_winkler_similarity(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    prefix_weight: f64,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let sim = 100.0 * dispatch_seq!(alg::jaro_winkler, &av, &bv, prefix_weight);
    Ok(check_norm_sim_cutoff(sim, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, prefix_weight=0.1, processor=None, score_cutoff=None))]
pub fn jaro_winkler_normalized_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    prefix_weight: f64,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    jaro_winkler_distance(py, s1, s2, prefix_weight, processor, score_cutoff)
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, prefix_weight=0.1, processor=None, score_cutoff=None))]
pub fn jaro_winkler_normalized_similarity(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    prefix_weight: f64,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    jaro_winkler_similarity(py, s1, s2, prefix_weight, processor, score_cutoff)
}

// ===========================================================================
// PREFIX / POSTFIX
// ===========================================================================

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn prefix_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<usize>,
) -> PyResult<usize> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let dist = dispatch_seq!(alg::prefix_distance, &av, &bv);
    Ok(check_distance_cutoff(dist, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn prefix_similarity(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<usize>,
) -> PyResult<usize> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let sim = dispatch_seq!(alg::prefix_similarity, &av, &bv);
    Ok(check_similarity_cutoff(sim, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn prefix_normalized_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(100.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let dist = dispatch_seq!(alg::prefix_distance, &av, &bv);
    let nd = alg::normalized_distance(dist, av.len().max(bv.len()));
    Ok(check_norm_dist_cutoff(nd, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn prefix_normalized_similarity(
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
    let dist = dispatch_seq!(alg::prefix_distance, &av, &bv);
    let ns = alg::normalized_similarity(dist, av.len().max(bv.len()));
    Ok(check_norm_sim_cutoff(ns, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn postfix_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<usize>,
) -> PyResult<usize> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let dist = dispatch_seq!(alg::postfix_distance, &av, &bv);
    Ok(check_distance_cutoff(dist, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn postfix_similarity(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<usize>,
) -> PyResult<usize> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let sim = dispatch_seq!(alg::postfix_similarity, &av, &bv);
    Ok(check_similarity_cutoff(sim, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn postfix_normalized_distance(
    py: Python<'_>,
    s1: &Bound<'_, PyAny>,
    s2: &Bound<'_, PyAny>,
    processor: Option<PyObject>,
    score_cutoff: Option<f64>,
) -> PyResult<f64> {
    if is_missing(s1) || is_missing(s2) {
        return Ok(100.0);
    }
    let (a_obj, b_obj) = get_processed_args(py, s1, s2, &processor)?;
    let av = extract_sequence(&a_obj)?;
    let bv = extract_sequence(&b_obj)?;
    let dist = dispatch_seq!(alg::postfix_distance, &av, &bv);
    let nd = alg::normalized_distance(dist, av.len().max(bv.len()));
    Ok(check_norm_dist_cutoff(nd, score_cutoff))
}

#[pyfunction]
#[pyo3(signature = (s1, s2, *, processor=None, score_cutoff=None))]
pub fn postfix_normalized_similarity(
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
    let dist = dispatch_seq!(alg::postfix_distance, &av, &bv);
    let ns = alg::normalized_similarity(dist, av.len().max(bv.len()));
    Ok(check_norm_sim_cutoff(ns, score_cutoff))
}
