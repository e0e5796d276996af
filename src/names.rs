//! Type name utilities
//!
//! Pure string operations over declared type names: array-annotation
//! stripping and package/resource splitting. Parsing of the definition
//! language itself lives outside this crate.

/// Separator between a package name and a resource name
pub const PACKAGE_SEP: char = '/';

/// Strip any array annotation from a declared field type
///
/// `"float64[]"` and `"float64[3]"` both yield `"float64"`; a type with no
/// annotation is returned unchanged.
pub fn base_msg_type(ty: &str) -> &str {
    match ty.find('[') {
        Some(idx) => &ty[..idx],
        None => ty,
    }
}

/// Split a possibly package-qualified name into (package, resource)
///
/// The package is empty when the name carries no separator.
pub fn package_resource_name(name: &str) -> (&str, &str) {
    match name.split_once(PACKAGE_SEP) {
        Some((pkg, res)) => (pkg, res),
        None => ("", name),
    }
}

/// Qualify a bare name with a package context; already-qualified names are
/// returned unchanged
pub fn qualify(name: &str, package: &str) -> String {
    if name.contains(PACKAGE_SEP) || package.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", package, PACKAGE_SEP, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_msg_type_plain() {
        assert_eq!(base_msg_type("float64"), "float64");
        assert_eq!(base_msg_type("geom/Point"), "geom/Point");
    }

    #[test]
    fn test_base_msg_type_arrays() {
        assert_eq!(base_msg_type("float64[]"), "float64");
        assert_eq!(base_msg_type("uint8[16]"), "uint8");
        assert_eq!(base_msg_type("geom/Point[]"), "geom/Point");
    }

    #[test]
    fn test_package_resource_name() {
        assert_eq!(package_resource_name("geom/Point"), ("geom", "Point"));
        assert_eq!(package_resource_name("Point"), ("", "Point"));
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("Point", "geom"), "geom/Point");
        assert_eq!(qualify("geom/Point", "other"), "geom/Point");
        assert_eq!(qualify("Point", ""), "Point");
    }
}
