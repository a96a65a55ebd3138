use bitflags::bitflags;

use crate::SchemaViolation;

bitflags! {
    /// Modifier bits as reported by JVM reflection, plus [`Modifiers::ENUM_CONSTANT`].
    #[derive(Default)]
    pub struct Modifiers: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const VOLATILE = 0x0040;
        const TRANSIENT = 0x0080;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        // Not a reflection modifier; marks fields declared as enum constants.
        const ENUM_CONSTANT = 0x4000;
    }
}

pub(crate) const VISIBILITY: &str = "visibility";
pub(crate) const ENUM_CONSTANT: &str = "metalava:enumConstant";

/// ORs together the contribution of every attribute. Attributes that are not modifiers
/// contribute nothing.
pub fn decode_modifiers<'a>(
    attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<Modifiers, SchemaViolation> {
    attributes
        .into_iter()
        .try_fold(Modifiers::empty(), |modifiers, (name, value)| {
            Ok(modifiers | modifier(name, value)?)
        })
}

fn modifier(name: &str, value: &str) -> Result<Modifiers, SchemaViolation> {
    let flag = match name {
        "abstract" => Modifiers::ABSTRACT,
        "final" => Modifiers::FINAL,
        "native" => Modifiers::NATIVE,
        "static" => Modifiers::STATIC,
        "synchronized" => Modifiers::SYNCHRONIZED,
        "transient" => Modifiers::TRANSIENT,
        "volatile" => Modifiers::VOLATILE,
        ENUM_CONSTANT => Modifiers::ENUM_CONSTANT,
        VISIBILITY => return visibility(value),
        _ => return Ok(Modifiers::empty()),
    };

    Ok(if value == "true" {
        flag
    } else {
        Modifiers::empty()
    })
}

fn visibility(value: &str) -> Result<Modifiers, SchemaViolation> {
    match value {
        "public" => Ok(Modifiers::PUBLIC),
        "protected" => Ok(Modifiers::PROTECTED),
        "" => Ok(Modifiers::empty()),
        "private" => Err(SchemaViolation::PrivateVisibility),
        _ => Err(SchemaViolation::UnknownModifierValue {
            attribute: VISIBILITY.to_owned(),
            value: value.to_owned(),
        }),
    }
}
