//! # Binding Model
//!
//! Folds raw registrations into registries. This is the only place
//! registrations are keyed: globals by name, methods by `(type, method)`,
//! types by type name. Repeated registrations under one key accumulate.

use serde::Serialize;

use bindsync_core::{MethodKey, Registry, Signature};

use crate::declaration::parse_declaration;
use crate::extract::{extract_registrations, RawRegistration, RegistrationKind};

/// One parsed function or method registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingEntry {
    /// Parsed declaration.
    pub signature: Signature,
    /// Owning type, for method registrations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// 1-based source line of the registration call.
    pub line: usize,
}

/// Canonical model of what the binding source registers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingModel {
    /// Registered global functions, by name.
    pub global_functions: Registry<String, BindingEntry>,
    /// Registered object methods, by `(type, method)`.
    pub object_methods: Registry<MethodKey, BindingEntry>,
    /// Registered object types, with the line of each registration.
    pub object_types: Registry<String, usize>,
    /// Function and method registrations whose declaration did not parse.
    pub unparsed: Vec<RawRegistration>,
}

impl BindingModel {
    /// Reduce extracted registrations into the model.
    pub fn from_registrations(registrations: &[RawRegistration]) -> Self {
        let mut model = Self::default();

        for reg in registrations {
            match &reg.kind {
                RegistrationKind::GlobalFunction { declaration } => {
                    match parse_declaration(declaration) {
                        Ok(signature) => model.global_functions.push(
                            signature.name.clone(),
                            BindingEntry {
                                signature,
                                type_name: None,
                                line: reg.line,
                            },
                        ),
                        Err(e) => model.record_unparsed(reg, &e.to_string()),
                    }
                }
                RegistrationKind::ObjectMethod {
                    type_name,
                    declaration,
                } => match parse_declaration(declaration) {
                    Ok(signature) => model.object_methods.push(
                        MethodKey::new(type_name, &signature.name),
                        BindingEntry {
                            signature,
                            type_name: Some(type_name.clone()),
                            line: reg.line,
                        },
                    ),
                    Err(e) => model.record_unparsed(reg, &e.to_string()),
                },
                RegistrationKind::ObjectType { type_name } => {
                    model.object_types.push(type_name.clone(), reg.line);
                }
            }
        }

        for key in model.object_methods.keys() {
            if !model.object_types.contains_key(&key.type_name) {
                tracing::debug!(method = %key, "method registered on a type with no visible type registration");
            }
        }

        tracing::info!(
            global_functions = model.global_functions.len(),
            object_methods = model.object_methods.len(),
            object_types = model.object_types.len(),
            unparsed = model.unparsed.len(),
            "built binding model"
        );

        model
    }

    /// Extract and reduce in one step, using the default extractor.
    pub fn from_source(text: &str) -> Self {
        Self::from_registrations(&extract_registrations(text))
    }

    /// Registered method keys whose method component equals `name`, in
    /// registration order.
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodKey> + 'a {
        self.object_methods.keys().filter(move |k| k.method == name)
    }

    fn record_unparsed(&mut self, reg: &RawRegistration, reason: &str) {
        tracing::warn!(line = reg.line, call = reg.kind.call_name(), %reason, "registration not understood; skipped");
        self.unparsed.push(reg.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
void RegisterAll(asIScriptEngine* engine) {
    engine->RegisterObjectType("Sound", 0, asOBJ_REF);
    engine->RegisterObjectType("Sound", 0, asOBJ_REF);
    engine->RegisterGlobalFunction("void drawRect(float, float, float, float)", asFUNCTION(a), asCALL_CDECL);
    engine->RegisterGlobalFunction("void drawRect(const Rect &in)", asFUNCTION(b), asCALL_CDECL);
    engine->RegisterGlobalFunction("Sound@ createSound(const string &in)", asFUNCTION(c), asCALL_CDECL);
    engine->RegisterGlobalFunction("not a declaration", asFUNCTION(d), asCALL_CDECL);
    engine->RegisterObjectMethod("Sound", "void play()", asMETHOD(Sound, play), asCALL_THISCALL);
    engine->RegisterObjectMethod("Sound", "bool isPlaying() const", asMETHOD(Sound, isPlaying), asCALL_THISCALL);
    engine->RegisterObjectMethod("Tween", "void play()", asMETHOD(Tween, play), asCALL_THISCALL);
    engine->RegisterObjectMethod("Sound", "broken(", asMETHOD(Sound, x), asCALL_THISCALL);
}
"#;

    #[test]
    fn overloads_accumulate_under_one_name() {
        let model = BindingModel::from_source(SOURCE);
        let draw_rect = model.global_functions.get_str("drawRect").unwrap();
        assert_eq!(draw_rect.len(), 2);
        assert_eq!(draw_rect[0].line, 5);
        assert_eq!(draw_rect[1].signature.parameter_types, vec!["const Rect &in"]);
    }

    #[test]
    fn methods_keyed_by_type_and_name() {
        let model = BindingModel::from_source(SOURCE);
        assert!(model.object_methods.contains_key(&MethodKey::new("Sound", "play")));
        assert!(model.object_methods.contains_key(&MethodKey::new("Sound", "isPlaying")));
        assert!(model.object_methods.contains_key(&MethodKey::new("Tween", "play")));
        let entry = &model
            .object_methods
            .get(&MethodKey::new("Sound", "play"))
            .unwrap()[0];
        assert_eq!(entry.type_name.as_deref(), Some("Sound"));
    }

    #[test]
    fn object_types_recorded_once_per_name() {
        let model = BindingModel::from_source(SOURCE);
        assert_eq!(model.object_types.len(), 1);
        assert_eq!(model.object_types.get_str("Sound"), Some(&[3, 4][..]));
    }

    #[test]
    fn unparsed_declarations_are_kept_aside() {
        let model = BindingModel::from_source(SOURCE);
        assert_eq!(model.unparsed.len(), 2);
        assert_eq!(model.unparsed[0].line, 8);
        assert_eq!(model.unparsed[1].kind.call_name(), "RegisterObjectMethod");
        assert!(!model.global_functions.contains_str("a"));
    }

    #[test]
    fn methods_named_scans_in_registration_order() {
        let model = BindingModel::from_source(SOURCE);
        let keys: Vec<String> = model.methods_named("play").map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["Sound.play", "Tween.play"]);
        assert_eq!(model.methods_named("stop").count(), 0);
    }

    #[test]
    fn empty_source_is_empty_model() {
        let model = BindingModel::from_source("");
        assert_eq!(model, BindingModel::default());
    }

    #[test]
    fn reduction_is_deterministic() {
        let regs = extract_registrations(SOURCE);
        assert_eq!(
            BindingModel::from_registrations(&regs),
            BindingModel::from_registrations(&regs)
        );
    }
}
