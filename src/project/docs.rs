//! The builtin-class documentation table.
//!
//! Godot ships machine-readable descriptions of every builtin class;
//! hosts hand the table over as JSON once at startup. The serde model
//! below mirrors that shape, and [`class_info_from_doc`] turns one entry
//! into a fresh class structure; the table itself is never mutated.

use indexmap::IndexMap;
use serde::Deserialize;
use smol_str::SmolStr;

use crate::hir::{
    ArgumentInfo, ClassInfo, ConstantInfo, MemberInfo, MethodInfo, ReturnInfo, SignalInfo,
    Structure, Symbol,
};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DocArgument {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DocReturn {
    #[serde(default, rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DocMethod {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<DocArgument>,
    #[serde(default, rename = "return_")]
    pub return_ty: DocReturn,
    #[serde(default)]
    pub qualifiers: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DocMember {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub setter: String,
    #[serde(default)]
    pub getter: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DocConstant {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, rename = "enum")]
    pub enum_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DocSignal {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<DocArgument>,
    #[serde(default)]
    pub description: String,
}

/// One class entry of the documentation table.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DocClass {
    #[serde(default)]
    pub inherits: String,
    #[serde(default)]
    pub brief_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub methods: Vec<DocMethod>,
    #[serde(default)]
    pub members: Vec<DocMember>,
    #[serde(default)]
    pub constants: Vec<DocConstant>,
    #[serde(default)]
    pub signals: Vec<DocSignal>,
}

/// The whole table, keyed by class name.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct BuiltinDocs {
    classes: IndexMap<String, DocClass>,
}

impl BuiltinDocs {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn classes(&self) -> impl Iterator<Item = (&str, &DocClass)> {
        self.classes.iter().map(|(name, class)| (name.as_str(), class))
    }

    pub fn get(&self, class_name: &str) -> Option<&DocClass> {
        self.classes.get(class_name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

fn argument_from_doc(index: usize, doc: &DocArgument) -> ArgumentInfo {
    ArgumentInfo {
        index: index as u32,
        name: SmolStr::new(&doc.name),
        ty: SmolStr::new(&doc.ty),
        default: doc.default.as_deref().map(SmolStr::new),
        description: doc.description.clone(),
    }
}

/// Pure transform of one documentation entry into a class structure.
pub(crate) fn class_info_from_doc(class_name: &str, doc: &DocClass) -> ClassInfo {
    let mut info = ClassInfo {
        name: SmolStr::new(class_name),
        inherits: SmolStr::new(&doc.inherits),
        brief_description: doc.brief_description.clone(),
        description: doc.description.clone(),
        ..ClassInfo::default()
    };

    for method in &doc.methods {
        let name = SmolStr::new(&method.name);
        info.methods.insert(
            name.clone(),
            Symbol::new(Structure::Method(MethodInfo {
                name,
                arguments: method
                    .arguments
                    .iter()
                    .enumerate()
                    .map(|(index, argument)| argument_from_doc(index, argument))
                    .collect(),
                return_ty: ReturnInfo {
                    ty: SmolStr::new(&method.return_ty.ty),
                    description: method.return_ty.description.clone(),
                },
                qualifiers: SmolStr::new(&method.qualifiers),
                description: method.description.clone(),
            })),
        );
    }
    for member in &doc.members {
        let name = SmolStr::new(&member.name);
        info.members.insert(
            name.clone(),
            Symbol::new(Structure::Member(MemberInfo {
                name,
                ty: SmolStr::new(&member.ty),
                setter: SmolStr::new(&member.setter),
                getter: SmolStr::new(&member.getter),
                description: member.description.clone(),
            })),
        );
    }
    for constant in &doc.constants {
        let name = SmolStr::new(&constant.name);
        info.constants.insert(
            name.clone(),
            Symbol::new(Structure::Constant(ConstantInfo {
                name,
                value: constant.value.clone(),
                enum_name: SmolStr::new(&constant.enum_name),
                description: constant.description.clone(),
            })),
        );
    }
    for signal in &doc.signals {
        let name = SmolStr::new(&signal.name);
        info.signals.insert(
            name.clone(),
            Symbol::new(Structure::Signal(SignalInfo {
                name,
                arguments: signal
                    .arguments
                    .iter()
                    .enumerate()
                    .map(|(index, argument)| argument_from_doc(index, argument))
                    .collect(),
                description: signal.description.clone(),
            })),
        );
    }

    info
}
