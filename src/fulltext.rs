//! Full-Text Assembly
//!
//! Concatenates a schema's raw definition text with the raw text of every
//! unique transitive dependency into one self-contained document, suitable
//! for storage alongside generated code as a provenance and compatibility
//! record.

use crate::deps::DependencyBundle;
use crate::error::{Result, SchemaError};
use crate::registry::TypeRegistry;

/// Width of the `=` delimiter line between embedded definitions
const SEPARATOR_WIDTH: usize = 80;

/// Assemble the self-contained full text for a resolved bundle
///
/// The root definition's text comes first, then for each entry in
/// `uniquedeps` (in that order) an 80-character `=` delimiter line, a
/// `MSG: <fully-qualified-type>` marker line, and the dependency's raw
/// definition text. The trailing newline introduced by the concatenation
/// is trimmed from the end of the document.
pub fn full_text(registry: &mut dyn TypeRegistry, bundle: &DependencyBundle) -> Result<String> {
    let sep = "=".repeat(SEPARATOR_WIDTH);

    let mut buff = String::new();
    buff.push_str(bundle.spec.text());
    buff.push('\n');
    for d in &bundle.uniquedeps {
        let dep = registry.get_registered(d, &bundle.package).ok_or_else(|| {
            SchemaError::UnresolvedType {
                name: d.to_string(),
            }
        })?;
        buff.push_str(&sep);
        buff.push('\n');
        buff.push_str(&format!("MSG: {}\n", d));
        buff.push_str(&dep.text);
        buff.push('\n');
    }
    // drop the final separator newline added by the loop (or after the root
    // text when there are no dependencies)
    buff.pop();
    Ok(buff)
}
