use pyo3::prelude::*;
use pyo3::types::PyBytes;

/// Default preprocessor: non-alphanumeric characters become spaces, the rest
/// is lowercased, surrounding whitespace is trimmed.
#[pyfunction]
#[pyo3(signature = (sentence))]
pub fn default_process(sentence: &Bound<'_, PyAny>) -> PyResult<String> {
    if sentence.is_none() {
        return Ok(String::new());
    }
    let text = if let Ok(bytes) = sentence.downcast::<PyBytes>() {
        bytes.as_bytes().iter().map(|&b| b as char).collect::<String>()
    } else {
        sentence.extract::<String>()?
    };
    let replaced: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    Ok(replaced.to_lowercase().trim().to_string())
}
