//! Canonical text form of [`TypeExpr`].
//!
//! Literals are written as-is.  Indirections are written as
//! `@tag(arg,arg,...)`, where expression arguments nest:
//!
//! ```text
//! @global(config)              @const(\PHP_EOL)
//! @array(Foo)                  @elem(@global(rows))
//! @call(\app)
//! @method(@call(\app),make)    @prop(@global(user),name)
//! @static_call(\Foo,create)    @static_prop(\Foo,instance)
//! @base_param(0,\Foo,handle)
//! ```
//!
//! Decoding is strict: an unknown tag or a malformed argument list is a
//! [`DecodeError`], because it means the producer and the consumer of the
//! encoding disagree.
use std::fmt;

use super::TypeExpr;

/// The text of a type expression violates the encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("empty type expression")]
    Empty,

    #[error("unknown type expression tag '@{tag}' in '{text}'")]
    UnknownTag { tag: String, text: String },

    #[error("malformed type expression '{text}': {reason}")]
    Malformed { text: String, reason: &'static str },

    #[error("'@{tag}' takes {expected} argument(s), found {found} in '{text}'")]
    Arity {
        tag: String,
        expected: usize,
        found: usize,
        text: String,
    },

    #[error("invalid parameter index '{index}' in '{text}'")]
    BadIndex { index: String, text: String },
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Literal(name) => f.write_str(name),
            TypeExpr::GlobalVar(name) => write!(f, "@global({name})"),
            TypeExpr::Constant(name) => write!(f, "@const({name})"),
            TypeExpr::ArrayOf(inner) => write!(f, "@array({inner})"),
            TypeExpr::ElemOf(inner) => write!(f, "@elem({inner})"),
            TypeExpr::FunctionCall(name) => write!(f, "@call({name})"),
            TypeExpr::InstanceMethodCall { receiver, method } => {
                write!(f, "@method({receiver},{method})")
            }
            TypeExpr::InstancePropertyFetch { receiver, property } => {
                write!(f, "@prop({receiver},{property})")
            }
            TypeExpr::StaticMethodCall { class, method } => {
                write!(f, "@static_call({class},{method})")
            }
            TypeExpr::StaticPropertyFetch { class, property } => {
                write!(f, "@static_prop({class},{property})")
            }
            TypeExpr::BaseMethodParam {
                index,
                class,
                method,
            } => write!(f, "@base_param({index},{class},{method})"),
        }
    }
}

pub(super) fn decode(text: &str) -> Result<TypeExpr, DecodeError> {
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }

    let Some(body) = text.strip_prefix('@') else {
        return Ok(TypeExpr::Literal(text.to_string()));
    };

    let malformed = |reason| DecodeError::Malformed {
        text: text.to_string(),
        reason,
    };

    let open = body.find('(').ok_or_else(|| malformed("missing '('"))?;
    let tag = &body[..open];
    let inner = body[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| malformed("missing closing ')'"))?;
    let args = split_args(inner).ok_or_else(|| malformed("unbalanced brackets"))?;

    let arity = |expected: usize| {
        if args.len() == expected {
            Ok(())
        } else {
            Err(DecodeError::Arity {
                tag: tag.to_string(),
                expected,
                found: args.len(),
                text: text.to_string(),
            })
        }
    };
    let name = |arg: &str| {
        if arg.is_empty() {
            Err(malformed("empty name"))
        } else {
            Ok(arg.to_string())
        }
    };

    match tag {
        "global" => {
            arity(1)?;
            Ok(TypeExpr::GlobalVar(name(args[0])?))
        }
        "const" => {
            arity(1)?;
            Ok(TypeExpr::Constant(name(args[0])?))
        }
        "array" => {
            arity(1)?;
            Ok(TypeExpr::array_of(decode(args[0])?))
        }
        "elem" => {
            arity(1)?;
            Ok(TypeExpr::elem_of(decode(args[0])?))
        }
        "call" => {
            arity(1)?;
            Ok(TypeExpr::FunctionCall(name(args[0])?))
        }
        "method" => {
            arity(2)?;
            Ok(TypeExpr::method_call(decode(args[0])?, name(args[1])?))
        }
        "prop" => {
            arity(2)?;
            Ok(TypeExpr::property_fetch(decode(args[0])?, name(args[1])?))
        }
        "static_call" => {
            arity(2)?;
            Ok(TypeExpr::static_call(name(args[0])?, name(args[1])?))
        }
        "static_prop" => {
            arity(2)?;
            Ok(TypeExpr::static_property(name(args[0])?, name(args[1])?))
        }
        "base_param" => {
            arity(3)?;
            let index = args[0]
                .parse::<usize>()
                .map_err(|_| DecodeError::BadIndex {
                    index: args[0].to_string(),
                    text: text.to_string(),
                })?;
            Ok(TypeExpr::base_method_param(
                index,
                name(args[1])?,
                name(args[2])?,
            ))
        }
        _ => Err(DecodeError::UnknownTag {
            tag: tag.to_string(),
            text: text.to_string(),
        }),
    }
}

/// Split an argument list at commas that are not nested inside brackets.
///
/// Returns `None` when the brackets do not balance.
fn split_args(inner: &str) -> Option<Vec<&str>> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, b) in inner.bytes().enumerate() {
        match b {
            b'(' | b'<' | b'{' | b'[' => depth += 1,
            b')' | b'>' | b'}' | b']' => depth = depth.checked_sub(1)?,
            b',' if depth == 0 => {
                args.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return None;
    }
    args.push(&inner[start..]);
    Some(args)
}
