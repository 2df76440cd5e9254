//! # Registration Extraction
//!
//! Finds registration call-sites in binding source text. This stage only
//! records what it saw and where; parsing declarations and building maps
//! happens in [`crate::model`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static GLOBAL_FUNCTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"RegisterGlobalFunction\s*\(\s*"([^"]+)""#).expect("static regex")
});

static OBJECT_METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"RegisterObjectMethod\s*\(\s*"(\w+)"\s*,\s*"([^"]+)""#).expect("static regex")
});

static OBJECT_TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"RegisterObjectType\s*\(\s*"(\w+)""#).expect("static regex"));

/// What a call-site registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistrationKind {
    /// `RegisterGlobalFunction("<decl>", ...)`
    GlobalFunction {
        /// Quoted declaration string.
        declaration: String,
    },
    /// `RegisterObjectMethod("<Type>", "<decl>", ...)`
    ObjectMethod {
        /// Quoted owning type.
        type_name: String,
        /// Quoted declaration string.
        declaration: String,
    },
    /// `RegisterObjectType("<Type>", ...)`
    ObjectType {
        /// Quoted type name.
        type_name: String,
    },
}

impl RegistrationKind {
    /// Name of the registration call this kind was extracted from.
    pub fn call_name(&self) -> &'static str {
        match self {
            Self::GlobalFunction { .. } => "RegisterGlobalFunction",
            Self::ObjectMethod { .. } => "RegisterObjectMethod",
            Self::ObjectType { .. } => "RegisterObjectType",
        }
    }

    /// The quoted declaration, for function and method registrations.
    pub fn declaration(&self) -> Option<&str> {
        match self {
            Self::GlobalFunction { declaration } | Self::ObjectMethod { declaration, .. } => {
                Some(declaration.as_str())
            }
            Self::ObjectType { .. } => None,
        }
    }
}

/// One registration call-site as found in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawRegistration {
    /// What was registered.
    #[serde(flatten)]
    pub kind: RegistrationKind,
    /// 1-based line of the call name.
    pub line: usize,
}

/// Source of raw registrations.
///
/// The matching-call-shape assumptions live behind this trait so they can
/// be swapped or tested on their own.
pub trait RegistrationExtractor {
    /// Every registration call-site in `text`.
    fn extract_registrations(&self, text: &str) -> Vec<RawRegistration>;
}

/// Extractor for AngelScript engine registration calls.
///
/// Results are grouped by call shape (globals, then methods, then types)
/// and in source order within each group.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngelScriptExtractor;

impl RegistrationExtractor for AngelScriptExtractor {
    fn extract_registrations(&self, text: &str) -> Vec<RawRegistration> {
        let lines = LineIndex::new(text);
        let mut found = Vec::new();

        for caps in GLOBAL_FUNCTION_RE.captures_iter(text) {
            let (Some(call), Some(decl)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            found.push(RawRegistration {
                kind: RegistrationKind::GlobalFunction {
                    declaration: decl.as_str().to_string(),
                },
                line: lines.line_of(call.start()),
            });
        }

        for caps in OBJECT_METHOD_RE.captures_iter(text) {
            let (Some(call), Some(ty), Some(decl)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            found.push(RawRegistration {
                kind: RegistrationKind::ObjectMethod {
                    type_name: ty.as_str().to_string(),
                    declaration: decl.as_str().to_string(),
                },
                line: lines.line_of(call.start()),
            });
        }

        for caps in OBJECT_TYPE_RE.captures_iter(text) {
            let (Some(call), Some(ty)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            found.push(RawRegistration {
                kind: RegistrationKind::ObjectType {
                    type_name: ty.as_str().to_string(),
                },
                line: lines.line_of(call.start()),
            });
        }

        tracing::debug!(registrations = found.len(), "extracted registration call-sites");
        found
    }
}

/// Extract registrations with the default [`AngelScriptExtractor`].
pub fn extract_registrations(text: &str) -> Vec<RawRegistration> {
    AngelScriptExtractor.extract_registrations(text)
}

/// Byte offset to line number lookup.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_all_three_call_shapes() {
        let src = r#"
engine->RegisterObjectType("Sound", 0, asOBJ_REF);
engine->RegisterGlobalFunction("void drawRect(float, float, float, float)", asFUNCTION(drawRect), asCALL_CDECL);
engine->RegisterObjectMethod("Sound", "void play()", asMETHOD(Sound, play), asCALL_THISCALL);
"#;
        let regs = extract_registrations(src);
        assert_eq!(regs.len(), 3);
        assert_eq!(
            regs[0].kind,
            RegistrationKind::GlobalFunction {
                declaration: "void drawRect(float, float, float, float)".into()
            }
        );
        assert_eq!(regs[0].line, 3);
        assert_eq!(
            regs[1].kind,
            RegistrationKind::ObjectMethod {
                type_name: "Sound".into(),
                declaration: "void play()".into()
            }
        );
        assert_eq!(regs[1].line, 4);
        assert_eq!(
            regs[2].kind,
            RegistrationKind::ObjectType {
                type_name: "Sound".into()
            }
        );
        assert_eq!(regs[2].line, 2);
    }

    #[test]
    fn arguments_may_span_lines() {
        let src = "r = engine->RegisterObjectMethod(\n    \"Texture\",\n    \"void bind() const\",\n    asMETHOD(Texture, bind), asCALL_THISCALL);";
        let regs = extract_registrations(src);
        assert_eq!(regs.len(), 1);
        assert_eq!(regs[0].line, 1);
        assert_eq!(regs[0].kind.declaration(), Some("void bind() const"));
    }

    #[test]
    fn non_literal_arguments_are_invisible() {
        let src = r#"
engine->RegisterGlobalFunction(decl.c_str(), fn, asCALL_CDECL);
engine->RegisterObjectMethod(typeName, "void x()", fn, asCALL_THISCALL);
engine->RegisterObjectType(name, 0, asOBJ_REF);
"#;
        assert!(extract_registrations(src).is_empty());
    }

    #[test]
    fn commented_out_calls_are_still_seen() {
        // The grammar is textual; comments are not stripped.
        let src = r#"// engine->RegisterGlobalFunction("void legacy()", ...);"#;
        assert_eq!(extract_registrations(src).len(), 1);
    }

    #[test]
    fn groups_by_shape_then_source_order() {
        let src = r#"
RegisterObjectMethod("A", "void m1()"
RegisterGlobalFunction("void g1()"
RegisterObjectMethod("B", "void m2()"
RegisterGlobalFunction("void g2()"
"#;
        let regs = extract_registrations(src);
        let decls: Vec<&str> = regs.iter().filter_map(|r| r.kind.declaration()).collect();
        assert_eq!(decls, vec!["void g1()", "void g2()", "void m1()", "void m2()"]);
        let lines: Vec<usize> = regs.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![3, 5, 2, 4]);
    }

    #[test]
    fn call_names_round_trip_kinds() {
        let regs = extract_registrations(r#"RegisterObjectType("Fbo""#);
        assert_eq!(regs[0].kind.call_name(), "RegisterObjectType");
        assert_eq!(regs[0].kind.declaration(), None);
    }

    #[test]
    fn line_index_boundaries() {
        let idx = LineIndex::new("a\nb\n\nc");
        assert_eq!(idx.line_of(0), 1);
        assert_eq!(idx.line_of(1), 1);
        assert_eq!(idx.line_of(2), 2);
        assert_eq!(idx.line_of(4), 3);
        assert_eq!(idx.line_of(5), 4);
    }

    #[test]
    fn raw_registration_serializes_flat() {
        let reg = RawRegistration {
            kind: RegistrationKind::ObjectMethod {
                type_name: "Mesh".into(),
                declaration: "void draw()".into(),
            },
            line: 12,
        };
        let json = serde_json::to_value(&reg).unwrap();
        assert_eq!(json["kind"], "object_method");
        assert_eq!(json["type_name"], "Mesh");
        assert_eq!(json["declaration"], "void draw()");
        assert_eq!(json["line"], 12);
    }
}
