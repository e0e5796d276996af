//! Schema types and structures

use serde::{Deserialize, Serialize};

use crate::names;

/// A single field declaration: declared type text plus field name
///
/// The type text is kept verbatim, including any array annotation
/// (`float64[]`, `uint8[16]`), because builtin fields contribute their
/// declared type literally to the canonical hash text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Declared type text, e.g. `"float64"` or `"geom/Point[]"`
    pub ty: String,
    /// Field name
    pub name: String,
}

impl Field {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }

    /// Base type with any array annotation stripped
    pub fn base_type(&self) -> &str {
        names::base_msg_type(&self.ty)
    }
}

/// A constant declaration: type, name, and verbatim literal text
///
/// Declaration order is semantically significant: constants participate in
/// the canonical hash text in the order they were declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constant {
    pub ty: String,
    pub name: String,
    /// The literal value exactly as written in the definition
    pub value: String,
}

impl Constant {
    pub fn new(ty: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A parsed message definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSchema {
    /// Owning package; empty for package-less local definitions
    pub package: String,
    /// Bare type name (no package qualifier)
    pub name: String,
    /// Field declarations in original order
    pub fields: Vec<Field>,
    /// Constant declarations in original order
    pub constants: Vec<Constant>,
    /// Verbatim original definition text, comments and all
    pub text: String,
}

impl MessageSchema {
    pub fn new(
        package: impl Into<String>,
        name: impl Into<String>,
        fields: Vec<Field>,
        constants: Vec<Constant>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            fields,
            constants,
            text: text.into(),
        }
    }

    /// Package-qualified type name, or the bare name when package is empty
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.package, self.name)
        }
    }
}

/// A parsed service definition: exactly a request/response message pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSchema {
    pub package: String,
    pub name: String,
    pub request: MessageSchema,
    pub response: MessageSchema,
    /// Verbatim original definition text
    pub text: String,
}

impl ServiceSchema {
    pub fn new(
        package: impl Into<String>,
        name: impl Into<String>,
        request: MessageSchema,
        response: MessageSchema,
        text: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            request,
            response,
            text: text.into(),
        }
    }
}

/// A schema definition: either a message or a service
///
/// Resolution, canonicalization, and fingerprinting all dispatch over this
/// tag; a value that is neither message nor service cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schema {
    Message(MessageSchema),
    Service(ServiceSchema),
}

impl Schema {
    /// Verbatim original definition text of the root definition
    pub fn text(&self) -> &str {
        match self {
            Schema::Message(m) => &m.text,
            Schema::Service(s) => &s.text,
        }
    }

    /// Package-qualified type name
    pub fn full_name(&self) -> String {
        match self {
            Schema::Message(m) => m.full_name(),
            Schema::Service(s) => {
                if s.package.is_empty() {
                    s.name.clone()
                } else {
                    format!("{}/{}", s.package, s.name)
                }
            }
        }
    }
}

impl From<MessageSchema> for Schema {
    fn from(m: MessageSchema) -> Self {
        Schema::Message(m)
    }
}

impl From<ServiceSchema> for Schema {
    fn from(s: ServiceSchema) -> Self {
        Schema::Service(s)
    }
}
