// SPDX-License-Identifier: MIT
// Python-facing result classes: Editop, Editops, Opcode, Opcodes,
// MatchingBlock, ScoreAlignment. String tags exist only at this boundary;
// internally everything is the typed EditOp / OpcodeSpan representation.

use pyo3::exceptions::{PyIndexError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyList, PySlice, PyTuple};

use crate::algorithms::{
    editops_matching_blocks, editops_to_opcodes, opcodes_to_editops, EditKind, EditOp, OpcodeSpan,
    SpanKind,
};

// ---------------------------------------------------------------------------
// Editop
// ---------------------------------------------------------------------------

#[pyclass(module = "seqdist.distance._initialize")]
#[derive(Clone, Debug, PartialEq)]
pub struct Editop {
    pub op: EditOp,
}

impl Editop {
    pub fn from_op(op: EditOp) -> Self {
        Editop { op }
    }
}

#[pymethods]
impl Editop {
    #[new]
    fn new(tag: &str, src_pos: usize, dest_pos: usize) -> PyResult<Self> {
        let kind = EditKind::from_tag(tag)
            .ok_or_else(|| PyValueError::new_err(format!("invalid editop tag: {tag:?}")))?;
        Ok(Editop { op: EditOp::new(kind, src_pos, dest_pos) })
    }

    #[getter]
    fn tag(&self) -> &'static str {
        self.op.kind.tag()
    }

    #[setter]
    fn set_tag(&mut self, tag: &str) -> PyResult<()> {
        self.op.kind = EditKind::from_tag(tag)
            .ok_or_else(|| PyValueError::new_err(format!("invalid editop tag: {tag:?}")))?;
        Ok(())
    }

    #[getter]
    fn src_pos(&self) -> usize {
        self.op.src_pos
    }

    #[setter]
    fn set_src_pos(&mut self, pos: usize) {
        self.op.src_pos = pos;
    }

    #[getter]
    fn dest_pos(&self) -> usize {
        self.op.dest_pos
    }

    #[setter]
    fn set_dest_pos(&mut self, pos: usize) {
        self.op.dest_pos = pos;
    }

    fn __repr__(&self) -> String {
        format!(
            "Editop(tag='{}', src_pos={}, dest_pos={})",
            self.op.kind.tag(),
            self.op.src_pos,
            self.op.dest_pos
        )
    }

    fn __eq__(&self, other: &Bound<'_, PyAny>) -> bool {
        parse_editop(other).map(|op| op == self.op).unwrap_or(false)
    }

    fn __hash__(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut h = DefaultHasher::new();
        self.op.hash(&mut h);
        h.finish()
    }

    fn __len__(&self) -> usize {
        3
    }

    fn __getitem__(&self, idx: i64, py: Python<'_>) -> PyResult<PyObject> {
        let items = self.items(py)?;
        let i = if idx < 0 { 3 + idx } else { idx };
        if !(0..3).contains(&i) {
            return Err(PyIndexError::new_err("Editop index out of range"));
        }
        Ok(items[i as usize].clone_ref(py))
    }

    fn __iter__(&self, py: Python<'_>) -> PyResult<PyObject> {
        let list = PyList::new(py, self.items(py)?)?;
        Ok(list.as_any().call_method0("__iter__")?.unbind())
    }
}

impl Editop {
    fn items(&self, py: Python<'_>) -> PyResult<[PyObject; 3]> {
        Ok([
            self.op.kind.tag().into_pyobject(py)?.into_any().unbind(),
            self.op.src_pos.into_pyobject(py)?.into_any().unbind(),
            self.op.dest_pos.into_pyobject(py)?.into_any().unbind(),
        ])
    }
}

// ---------------------------------------------------------------------------
// Opcode
// ---------------------------------------------------------------------------

#[pyclass(module = "seqdist.distance._initialize")]
#[derive(Clone, Debug, PartialEq)]
pub struct Opcode {
    pub span: OpcodeSpan,
}

#[pymethods]
impl Opcode {
    #[new]
    #[pyo3(signature = (tag="equal", src_start=0, src_end=0, dest_start=0, dest_end=0))]
    fn new(
        tag: &str,
        src_start: usize,
        src_end: usize,
        dest_start: usize,
        dest_end: usize,
    ) -> PyResult<Self> {
        let kind = SpanKind::from_tag(tag)
            .ok_or_else(|| PyValueError::new_err(format!("invalid opcode tag: {tag:?}")))?;
        Ok(Opcode { span: OpcodeSpan { kind, src_start, src_end, dest_start, dest_end } })
    }

    #[getter]
    fn tag(&self) -> &'static str {
        self.span.kind.tag()
    }

    #[getter]
    fn src_start(&self) -> usize {
        self.span.src_start
    }

    #[getter]
    fn src_end(&self) -> usize {
        self.span.src_end
    }

    #[getter]
    fn dest_start(&self) -> usize {
        self.span.dest_start
    }

    #[getter]
    fn dest_end(&self) -> usize {
        self.span.dest_end
    }

    fn __repr__(&self) -> String {
        format!(
            "Opcode(tag='{}', src_start={}, src_end={}, dest_start={}, dest_end={})",
            self.span.kind.tag(),
            self.span.src_start,
            self.span.src_end,
            self.span.dest_start,
            self.span.dest_end
        )
    }

    fn __eq__(&self, other: &Bound<'_, PyAny>) -> bool {
        parse_opcode(other).map(|span| span == self.span).unwrap_or(false)
    }

    fn __hash__(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut h = DefaultHasher::new();
        self.span.hash(&mut h);
        h.finish()
    }

    fn __len__(&self) -> usize {
        5
    }

    fn __getitem__(&self, idx: i64, py: Python<'_>) -> PyResult<PyObject> {
        let items = self.items(py)?;
        let i = if idx < 0 { 5 + idx } else { idx };
        if !(0..5).contains(&i) {
            return Err(PyIndexError::new_err("Opcode index out of range"));
        }
        Ok(items[i as usize].clone_ref(py))
    }

    fn __iter__(&self, py: Python<'_>) -> PyResult<PyObject> {
        let list = PyList::new(py, self.items(py)?)?;
        Ok(list.as_any().call_method0("__iter__")?.unbind())
    }
}

impl Opcode {
    fn items(&self, py: Python<'_>) -> PyResult<[PyObject; 5]> {
        Ok([
            self.span.kind.tag().into_pyobject(py)?.into_any().unbind(),
            self.span.src_start.into_pyobject(py)?.into_any().unbind(),
            self.span.src_end.into_pyobject(py)?.into_any().unbind(),
            self.span.dest_start.into_pyobject(py)?.into_any().unbind(),
            self.span.dest_end.into_pyobject(py)?.into_any().unbind(),
        ])
    }
}

// ---------------------------------------------------------------------------
// MatchingBlock / ScoreAlignment
// ---------------------------------------------------------------------------

#[pyclass(module = "seqdist.distance._initialize")]
#[derive(Clone, Debug, PartialEq)]
pub struct MatchingBlock {
    #[pyo3(get, set)]
    pub a: usize,
    #[pyo3(get, set)]
    pub b: usize,
    #[pyo3(get, set)]
    pub size: usize,
}

#[pymethods]
impl MatchingBlock {
    #[new]
    fn new(a: usize, b: usize, size: usize) -> Self {
        MatchingBlock { a, b, size }
    }

    fn __repr__(&self) -> String {
        format!("MatchingBlock(a={}, b={}, size={})", self.a, self.b, self.size)
    }

    fn __eq__(&self, other: &MatchingBlock) -> bool {
        self == other
    }
}

#[pyclass(module = "seqdist.distance._initialize")]
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreAlignment {
    #[pyo3(get, set)]
    pub score: f64,
    #[pyo3(get, set)]
    pub src_start: usize,
    #[pyo3(get, set)]
    pub src_end: usize,
    #[pyo3(get, set)]
    pub dest_start: usize,
    #[pyo3(get, set)]
    pub dest_end: usize,
}

#[pymethods]
impl ScoreAlignment {
    #[new]
    fn new(score: f64, src_start: usize, src_end: usize, dest_start: usize, dest_end: usize) -> Self {
        ScoreAlignment { score, src_start, src_end, dest_start, dest_end }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScoreAlignment(score={}, src_start={}, src_end={}, dest_start={}, dest_end={})",
            self.score, self.src_start, self.src_end, self.dest_start, self.dest_end
        )
    }

    fn __eq__(&self, other: &ScoreAlignment) -> bool {
        self == other
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

fn parse_editop(item: &Bound<'_, PyAny>) -> PyResult<EditOp> {
    if let Ok(op) = item.extract::<PyRef<Editop>>() {
        return Ok(op.op);
    }
    let tup = item.downcast::<PyTuple>()?;
    if tup.len() != 3 {
        return Err(PyTypeError::new_err("expected a 3-element tuple for an Editop"));
    }
    let tag: String = tup.get_item(0)?.extract()?;
    let kind = EditKind::from_tag(&tag)
        .ok_or_else(|| PyValueError::new_err(format!("invalid editop tag: {tag:?}")))?;
    Ok(EditOp::new(kind, tup.get_item(1)?.extract()?, tup.get_item(2)?.extract()?))
}

fn parse_opcode(item: &Bound<'_, PyAny>) -> PyResult<OpcodeSpan> {
    if let Ok(op) = item.extract::<PyRef<Opcode>>() {
        return Ok(op.span);
    }
    let tup = item.downcast::<PyTuple>()?;
    if tup.len() != 5 {
        return Err(PyTypeError::new_err("expected a 5-element tuple for an Opcode"));
    }
    let tag: String = tup.get_item(0)?.extract()?;
    let kind = SpanKind::from_tag(&tag)
        .ok_or_else(|| PyValueError::new_err(format!("invalid opcode tag: {tag:?}")))?;
    Ok(OpcodeSpan {
        kind,
        src_start: tup.get_item(1)?.extract()?,
        src_end: tup.get_item(2)?.extract()?,
        dest_start: tup.get_item(3)?.extract()?,
        dest_end: tup.get_item(4)?.extract()?,
    })
}

fn resolve_index(idx: i64, len: usize) -> PyResult<usize> {
    let n = len as i64;
    let i = if idx < 0 { n + idx } else { idx };
    if i < 0 || i >= n {
        return Err(PyIndexError::new_err("index out of range"));
    }
    Ok(i as usize)
}

// ---------------------------------------------------------------------------
// Editops
// ---------------------------------------------------------------------------

#[pyclass(module = "seqdist.distance._initialize")]
#[derive(Clone)]
pub struct Editops {
    pub ops: Vec<EditOp>,
    #[pyo3(get, set)]
    pub src_len: usize,
    #[pyo3(get, set)]
    pub dest_len: usize,
}

impl Editops {
    pub fn from_ops(ops: Vec<EditOp>, src_len: usize, dest_len: usize) -> Self {
        Editops { ops, src_len, dest_len }
    }
}

#[pymethods]
impl Editops {
    #[new]
    fn new(ops: &Bound<'_, PyAny>, src_len: usize, dest_len: usize) -> PyResult<Self> {
        let mut parsed: Vec<EditOp> = Vec::new();
        for item in ops.try_iter()? {
            let item = item?;
            if let Ok(op) = parse_editop(&item) {
                parsed.push(op);
            } else {
                let span = parse_opcode(&item)?;
                parsed.extend(opcodes_to_editops(&[span]));
            }
        }
        Ok(Editops { ops: parsed, src_len, dest_len })
    }

    fn __repr__(&self) -> String {
        format!(
            "Editops([{}], src_len={}, dest_len={})",
            self.ops
                .iter()
                .map(|op| format!(
                    "Editop(tag='{}', src_pos={}, dest_pos={})",
                    op.kind.tag(),
                    op.src_pos,
                    op.dest_pos
                ))
                .collect::<Vec<_>>()
                .join(", "),
            self.src_len,
            self.dest_len,
        )
    }

    fn __len__(&self) -> usize {
        self.ops.len()
    }

    fn __eq__(&self, other: &Editops) -> bool {
        self.ops == other.ops && self.src_len == other.src_len && self.dest_len == other.dest_len
    }

    fn __getitem__(&self, py: Python<'_>, key: &Bound<'_, PyAny>) -> PyResult<PyObject> {
        if let Ok(idx) = key.extract::<i64>() {
            let i = resolve_index(idx, self.ops.len())?;
            return Ok(Editop::from_op(self.ops[i]).into_pyobject(py)?.into_any().unbind());
        }
        if let Ok(slice) = key.downcast::<PySlice>() {
            let indices = slice.indices(self.ops.len() as isize)?;
            if indices.step <= 0 {
                return Err(PyValueError::new_err(
                    "step sizes below 1 lead to an invalid order of editops",
                ));
            }
            let mut ops = Vec::new();
            let mut i = indices.start;
            while i < indices.stop {
                ops.push(self.ops[i as usize]);
                i += indices.step;
            }
            let sliced = Editops { ops, src_len: self.src_len, dest_len: self.dest_len };
            return Ok(sliced.into_pyobject(py)?.into_any().unbind());
        }
        Err(PyTypeError::new_err("Editops indices must be integers or slices"))
    }

    fn __delitem__(&mut self, key: &Bound<'_, PyAny>) -> PyResult<()> {
        if let Ok(idx) = key.extract::<i64>() {
            let i = resolve_index(idx, self.ops.len())?;
            self.ops.remove(i);
            return Ok(());
        }
        if let Ok(slice) = key.downcast::<PySlice>() {
            let indices = slice.indices(self.ops.len() as isize)?;
            if indices.step <= 0 {
                return Err(PyValueError::new_err("slice step must be positive"));
            }
            let mut keep = vec![true; self.ops.len()];
            let mut i = indices.start;
            while i < indices.stop {
                keep[i as usize] = false;
                i += indices.step;
            }
            let mut idx = 0;
            self.ops.retain(|_| {
                let kept = keep[idx];
                idx += 1;
                kept
            });
            return Ok(());
        }
        Err(PyTypeError::new_err("Editops indices must be integers or slices"))
    }

    fn __iter__(&self, py: Python<'_>) -> PyResult<PyObject> {
        let items: Vec<PyObject> = self
            .ops
            .iter()
            .map(|&op| {
                Editop::from_op(op)
                    .into_pyobject(py)
                    .map(|v| v.into_any().unbind())
            })
            .collect::<Result<_, _>>()?;
        let list = PyList::new(py, items)?;
        Ok(list.as_any().call_method0("__iter__")?.unbind())
    }

    fn copy(&self) -> Editops {
        self.clone()
    }

    fn as_list(&self, py: Python<'_>) -> PyResult<PyObject> {
        let items: Vec<PyObject> = self
            .ops
            .iter()
            .map(|op| {
                PyTuple::new(
                    py,
                    [
                        op.kind.tag().into_pyobject(py)?.into_any().unbind(),
                        op.src_pos.into_pyobject(py)?.into_any().unbind(),
                        op.dest_pos.into_pyobject(py)?.into_any().unbind(),
                    ],
                )
                .map(|v| v.into_any().unbind())
            })
            .collect::<Result<_, _>>()?;
        Ok(PyList::new(py, items)?.into_any().unbind())
    }

    /// The script that turns the target back into the source.
    fn inverse(&self) -> Editops {
        let ops = self
            .ops
            .iter()
            .map(|op| {
                let kind = match op.kind {
                    EditKind::Insert => EditKind::Delete,
                    EditKind::Delete => EditKind::Insert,
                    EditKind::Replace => EditKind::Replace,
                };
                EditOp::new(kind, op.dest_pos, op.src_pos)
            })
            .collect();
        Editops { ops, src_len: self.dest_len, dest_len: self.src_len }
    }

    fn as_matching_blocks(&self, py: Python<'_>) -> PyResult<PyObject> {
        let blocks = editops_matching_blocks(&self.ops, self.src_len, self.dest_len);
        let items: Vec<PyObject> = blocks
            .into_iter()
            .map(|(a, b, size)| {
                MatchingBlock { a, b, size }
                    .into_pyobject(py)
                    .map(|v| v.into_any().unbind())
            })
            .collect::<Result<_, _>>()?;
        Ok(PyList::new(py, items)?.into_any().unbind())
    }

    fn as_opcodes(&self) -> Opcodes {
        Opcodes {
            spans: editops_to_opcodes(&self.ops, self.src_len, self.dest_len),
            src_len: self.src_len,
            dest_len: self.dest_len,
        }
    }

    fn remove_subsequence(&self, other: &Editops) -> Editops {
        let mut ops = self.ops.clone();
        for op in &other.ops {
            if let Some(pos) = ops.iter().position(|x| x == op) {
                ops.remove(pos);
            }
        }
        Editops { ops, src_len: self.src_len, dest_len: self.dest_len }
    }
}

// ---------------------------------------------------------------------------
// Opcodes
// ---------------------------------------------------------------------------

#[pyclass(module = "seqdist.distance._initialize")]
#[derive(Clone)]
pub struct Opcodes {
    pub spans: Vec<OpcodeSpan>,
    #[pyo3(get, set)]
    pub src_len: usize,
    #[pyo3(get, set)]
    pub dest_len: usize,
}

impl Opcodes {
    pub fn from_ops(ops: Vec<EditOp>, src_len: usize, dest_len: usize) -> Self {
        Opcodes { spans: editops_to_opcodes(&ops, src_len, dest_len), src_len, dest_len }
    }
}

/// Fill gaps between spans with Equal blocks and merge adjacent same-tag
/// spans, so hand-built opcode lists normalize to the canonical form.
fn merge_opcodes(input: Vec<OpcodeSpan>, src_len: usize, dest_len: usize) -> Vec<OpcodeSpan> {
    let mut result: Vec<OpcodeSpan> = Vec::new();
    let mut src_pos = 0usize;
    let mut dest_pos = 0usize;

    let mut push = |result: &mut Vec<OpcodeSpan>, span: OpcodeSpan| {
        if let Some(last) = result.last_mut() {
            if last.kind == span.kind {
                last.src_end = span.src_end;
                last.dest_end = span.dest_end;
                return;
            }
        }
        result.push(span);
    };

    for span in input {
        if src_pos < span.src_start || dest_pos < span.dest_start {
            let gap = (span.src_start - src_pos).min(span.dest_start - dest_pos);
            if gap > 0 {
                push(
                    &mut result,
                    OpcodeSpan {
                        kind: SpanKind::Equal,
                        src_start: src_pos,
                        src_end: src_pos + gap,
                        dest_start: dest_pos,
                        dest_end: dest_pos + gap,
                    },
                );
            }
        }
        src_pos = span.src_end;
        dest_pos = span.dest_end;
        push(&mut result, span);
    }

    if src_pos < src_len || dest_pos < dest_len {
        let gap = (src_len - src_pos).min(dest_len - dest_pos);
        if gap > 0 {
            push(
                &mut result,
                OpcodeSpan {
                    kind: SpanKind::Equal,
                    src_start: src_pos,
                    src_end: src_pos + gap,
                    dest_start: dest_pos,
                    dest_end: dest_pos + gap,
                },
            );
        }
    }
    result
}

#[pymethods]
impl Opcodes {
    #[new]
    fn new(ops: &Bound<'_, PyAny>, src_len: usize, dest_len: usize) -> PyResult<Self> {
        let mut spans: Vec<OpcodeSpan> = Vec::new();
        let mut editops: Vec<EditOp> = Vec::new();

        for item in ops.try_iter()? {
            let item = item?;
            if let Ok(span) = parse_opcode(&item) {
                spans.push(span);
            } else {
                editops.push(parse_editop(&item)?);
            }
        }

        if spans.is_empty() && editops.is_empty() {
            if src_len == 0 && dest_len == 0 {
                return Ok(Opcodes { spans: vec![], src_len, dest_len });
            }
            let all_equal = OpcodeSpan {
                kind: SpanKind::Equal,
                src_start: 0,
                src_end: src_len,
                dest_start: 0,
                dest_end: dest_len,
            };
            return Ok(Opcodes { spans: vec![all_equal], src_len, dest_len });
        }

        if spans.is_empty() {
            return Ok(Opcodes::from_ops(editops, src_len, dest_len));
        }
        Ok(Opcodes { spans: merge_opcodes(spans, src_len, dest_len), src_len, dest_len })
    }

    fn __repr__(&self) -> String {
        format!(
            "Opcodes([{}], src_len={}, dest_len={})",
            self.spans
                .iter()
                .map(|s| format!(
                    "Opcode(tag='{}', src_start={}, src_end={}, dest_start={}, dest_end={})",
                    s.kind.tag(),
                    s.src_start,
                    s.src_end,
                    s.dest_start,
                    s.dest_end
                ))
                .collect::<Vec<_>>()
                .join(", "),
            self.src_len,
            self.dest_len,
        )
    }

    fn __len__(&self) -> usize {
        self.spans.len()
    }

    fn __eq__(&self, other: &Opcodes) -> bool {
        self.spans == other.spans && self.src_len == other.src_len && self.dest_len == other.dest_len
    }

    fn __getitem__(&self, py: Python<'_>, idx: i64) -> PyResult<PyObject> {
        let i = resolve_index(idx, self.spans.len())?;
        Ok(Opcode { span: self.spans[i] }.into_pyobject(py)?.into_any().unbind())
    }

    fn __iter__(&self, py: Python<'_>) -> PyResult<PyObject> {
        let items: Vec<PyObject> = self
            .spans
            .iter()
            .map(|&span| Opcode { span }.into_pyobject(py).map(|v| v.into_any().unbind()))
            .collect::<Result<_, _>>()?;
        let list = PyList::new(py, items)?;
        Ok(list.as_any().call_method0("__iter__")?.unbind())
    }

    fn copy(&self) -> Opcodes {
        self.clone()
    }

    fn as_list(&self, py: Python<'_>) -> PyResult<PyObject> {
        let items: Vec<PyObject> = self
            .spans
            .iter()
            .map(|span| {
                PyTuple::new(
                    py,
                    [
                        span.kind.tag().into_pyobject(py)?.into_any().unbind(),
                        span.src_start.into_pyobject(py)?.into_any().unbind(),
                        span.src_end.into_pyobject(py)?.into_any().unbind(),
                        span.dest_start.into_pyobject(py)?.into_any().unbind(),
                        span.dest_end.into_pyobject(py)?.into_any().unbind(),
                    ],
                )
                .map(|v| v.into_any().unbind())
            })
            .collect::<Result<_, _>>()?;
        Ok(PyList::new(py, items)?.into_any().unbind())
    }

    fn inverse(&self) -> Opcodes {
        let spans = self
            .spans
            .iter()
            .map(|span| {
                let kind = match span.kind {
                    SpanKind::Insert => SpanKind::Delete,
                    SpanKind::Delete => SpanKind::Insert,
                    other => other,
                };
                OpcodeSpan {
                    kind,
                    src_start: span.dest_start,
                    src_end: span.dest_end,
                    dest_start: span.src_start,
                    dest_end: span.src_end,
                }
            })
            .collect();
        Opcodes { spans, src_len: self.dest_len, dest_len: self.src_len }
    }

    fn as_editops(&self) -> Editops {
        Editops {
            ops: opcodes_to_editops(&self.spans),
            src_len: self.src_len,
            dest_len: self.dest_len,
        }
    }

    fn as_matching_blocks(&self, py: Python<'_>) -> PyResult<PyObject> {
        let mut blocks: Vec<PyObject> = Vec::new();
        for span in &self.spans {
            if span.kind == SpanKind::Equal {
                let size = (span.src_end - span.src_start).min(span.dest_end - span.dest_start);
                if size > 0 {
                    let block = MatchingBlock { a: span.src_start, b: span.dest_start, size };
                    blocks.push(block.into_pyobject(py)?.into_any().unbind());
                }
            }
        }
        blocks.push(
            MatchingBlock { a: self.src_len, b: self.dest_len, size: 0 }
                .into_pyobject(py)?
                .into_any()
                .unbind(),
        );
        Ok(PyList::new(py, blocks)?.into_any().unbind())
    }
}
