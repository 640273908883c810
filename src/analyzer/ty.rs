use std::fmt;

use phf::phf_map;

static TYPE_NAMES: phf::Map<&'static str, Ty> = phf_map! {
    "int" => Ty::Int,
    "string" => Ty::String,
    "boolean" => Ty::Boolean,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    Int,
    String,
    Boolean,
}

impl Ty {
    pub fn from_keyword(keyword: &str) -> Option<Ty> {
        TYPE_NAMES.get(keyword).copied()
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Ty::Int)
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Int => write!(f, "int"),
            Ty::String => write!(f, "string"),
            Ty::Boolean => write!(f, "boolean"),
        }
    }
}
