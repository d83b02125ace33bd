use rowmap::{AnyResult, AsValue, Kind, NullInt64, NullString, Options, Record, Timestamp, Value};

#[derive(Record, Default, Debug, PartialEq)]
pub struct Foo {
    pub id: i32,
    pub foo: String,
    pub bar: Timestamp,
}

#[derive(Record, Default, Debug, PartialEq)]
pub struct Audit {
    #[rowmap(tag = "created_at")]
    pub created: Timestamp,
    #[rowmap(name = "created_by")]
    pub author: String,
}

#[derive(Record, Default, Debug, PartialEq)]
#[rowmap(name = "accounts")]
pub struct Account {
    #[rowmap(tag = "id,omitempty")]
    pub id: i64,
    pub audit: Audit,
    pub r#type: String,
    #[rowmap(tag = "-")]
    pub secret: String,
    #[rowmap(tag = "_")]
    pub hidden: i32,
    #[rowmap(ignore)]
    pub cache: Vec<String>,
}

#[derive(Record, Default, Debug, PartialEq)]
pub struct UserProfile {
    pub id: u64,
    pub nickname: Option<String>,
    pub score: NullInt64,
    pub note: NullString,
    pub active: bool,
    pub avatar: Vec<u8>,
}

/// Accepts only `u8` values and panics on anything else.
#[derive(Default, Debug, PartialEq)]
pub struct Fragile(pub u8);

impl AsValue for Fragile {
    fn kind() -> Kind {
        Kind::Custom("Fragile")
    }
    fn as_value(self) -> Value {
        Value::UInt8(self.0)
    }
    fn try_from_value(value: &Value, _options: &Options) -> AnyResult<Self> {
        match value {
            Value::UInt8(v) => Ok(Fragile(*v)),
            other => panic!("Fragile cannot hold {:?}", other),
        }
    }
}

#[derive(Record, Default, Debug, PartialEq)]
pub struct Gadget {
    pub name: String,
    pub part: Fragile,
    pub weight: f64,
}
