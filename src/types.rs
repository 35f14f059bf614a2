use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyString};

/// A borrowed view of the code units of one input. ASCII text and bytes stay
/// zero-copy; non-ASCII text is widened to its scalar values; arbitrary
/// sequences are mapped to u64 items (single-character strings by scalar
/// value, integers directly, anything else by hash).
#[derive(Clone, Debug)]
pub enum Seq<'a> {
    Ascii(&'a [u8]),
    U32(Vec<u32>),
    U64(Vec<u64>),
}

/// The owning counterpart of [`Seq`], used where scoring outlives the GIL
/// borrow (the rayon batch path).
#[derive(Clone, Debug)]
pub enum OwnedSeq {
    Ascii(Vec<u8>),
    U32(Vec<u32>),
    U64(Vec<u64>),
}

impl<'a> Seq<'a> {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        match self {
            Seq::Ascii(v) => v.len(),
            Seq::U32(v) => v.len(),
            Seq::U64(v) => v.len(),
        }
    }

    pub fn to_u64(&self) -> Vec<u64> {
        match self {
            Seq::Ascii(v) => v.iter().map(|&c| c as u64).collect(),
            Seq::U32(v) => v.iter().map(|&c| c as u64).collect(),
            Seq::U64(v) => v.clone(),
        }
    }

    /// Text form for the token-based scorers. Hashed item sequences have no
    /// text form and collapse to the empty string.
    pub fn to_string_lossy(&self) -> String {
        match self {
            Seq::Ascii(v) => String::from_utf8_lossy(v).into_owned(),
            Seq::U32(v) => v.iter().filter_map(|&c| char::from_u32(c)).collect(),
            Seq::U64(_) => String::new(),
        }
    }

    pub fn to_owned_seq(&self) -> OwnedSeq {
        match self {
            Seq::Ascii(v) => OwnedSeq::Ascii(v.to_vec()),
            Seq::U32(v) => OwnedSeq::U32(v.clone()),
            Seq::U64(v) => OwnedSeq::U64(v.clone()),
        }
    }
}

impl OwnedSeq {
    pub fn as_seq(&self) -> Seq<'_> {
        match self {
            OwnedSeq::Ascii(v) => Seq::Ascii(v),
            OwnedSeq::U32(v) => Seq::U32(v.clone()),
            OwnedSeq::U64(v) => Seq::U64(v.clone()),
        }
    }
}

pub fn extract_sequence<'a>(obj: &'a Bound<'a, PyAny>) -> PyResult<Seq<'a>> {
    if let Ok(s) = obj.downcast::<PyString>() {
        // Borrow the interpreter's UTF-8 buffer directly; for ASCII text the
        // bytes are the code units and nothing needs to be copied.
        unsafe {
            let mut length: isize = 0;
            let ptr = pyo3::ffi::PyUnicode_AsUTF8AndSize(s.as_ptr(), &mut length);
            if !ptr.is_null() {
                let slice = std::slice::from_raw_parts(ptr as *const u8, length as usize);
                if slice.is_ascii() {
                    return Ok(Seq::Ascii(slice));
                }
            }
        }
        let st = s.to_str()?;
        return Ok(Seq::U32(st.chars().map(|c| c as u32).collect()));
    }

    if let Ok(b) = obj.downcast::<PyBytes>() {
        return Ok(Seq::Ascii(b.as_bytes()));
    }

    if let Ok(seq) = obj.try_iter() {
        let mut result: Vec<u64> = Vec::new();
        for item in seq {
            let item = item?;
            if let Ok(s) = item.downcast::<PyString>() {
                let st = s.to_str()?;
                let mut chars = st.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    result.push(ch as u64);
                    continue;
                }
            }
            if let Ok(i) = item.extract::<u64>() {
                result.push(i);
                continue;
            }
            result.push(item.hash()? as u64);
        }
        return Ok(Seq::U64(result));
    }

    Err(pyo3::exceptions::PyTypeError::new_err(
        "expected str, bytes, or sequence",
    ))
}

pub fn get_processed_args<'py>(
    py: Python<'py>,
    s1: &Bound<'py, PyAny>,
    s2: &Bound<'py, PyAny>,
    processor: &Option<PyObject>,
) -> PyResult<(Bound<'py, PyAny>, Bound<'py, PyAny>)> {
    if let Some(proc) = processor {
        let p1 = proc.call1(py, (s1,))?.into_bound(py);
        let p2 = proc.call1(py, (s2,))?.into_bound(py);
        Ok((p1, p2))
    } else {
        Ok((s1.clone(), s2.clone()))
    }
}

/// None, float NaN and pandas-style NA sentinels are all treated as missing.
pub fn is_missing(obj: &Bound<'_, PyAny>) -> bool {
    if obj.is_none() {
        return true;
    }
    if let Ok(f) = obj.extract::<f64>() {
        return f.is_nan();
    }
    if let Ok(r) = obj.str() {
        return r.to_str().map(|s| s == "<NA>").unwrap_or(false);
    }
    false
}

/// Call a two-sequence kernel on a pair of [`Seq`] views, widening the
/// narrower operand so both sides share one code-unit type.
#[macro_export]
macro_rules! dispatch_seq {
    ($func:path, $s1:expr, $s2:expr $(, $args:expr)*) => {
        match ($s1, $s2) {
            ($crate::types::Seq::Ascii(a), $crate::types::Seq::Ascii(b)) => $func(*a, *b $(, $args)*),
            ($crate::types::Seq::Ascii(a), $crate::types::Seq::U32(b)) => $func(&a.iter().map(|&x| x as u32).collect::<Vec<_>>(), b $(, $args)*),
            ($crate::types::Seq::Ascii(a), $crate::types::Seq::U64(b)) => $func(&a.iter().map(|&x| x as u64).collect::<Vec<_>>(), b $(, $args)*),
            ($crate::types::Seq::U32(a), $crate::types::Seq::Ascii(b)) => $func(a, &b.iter().map(|&x| x as u32).collect::<Vec<_>>() $(, $args)*),
            ($crate::types::Seq::U32(a), $crate::types::Seq::U32(b)) => $func(a, b $(, $args)*),
            ($crate::types::Seq::U32(a), $crate::types::Seq::U64(b)) => $func(&a.iter().map(|&x| x as u64).collect::<Vec<_>>(), b $(, $args)*),
            ($crate::types::Seq::U64(a), $crate::types::Seq::Ascii(b)) => $func(a, &b.iter().map(|&x| x as u64).collect::<Vec<_>>() $(, $args)*),
            ($crate::types::Seq::U64(a), $crate::types::Seq::U32(b)) => $func(a, &b.iter().map(|&x| x as u64).collect::<Vec<_>>() $(, $args)*),
            ($crate::types::Seq::U64(a), $crate::types::Seq::U64(b)) => $func(a, b $(, $args)*),
        }
    };
}
