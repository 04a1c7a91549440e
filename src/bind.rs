use indexmap::IndexMap;
use qnative_derive::Bindable;

/// A value bound to a positional parameter.
#[derive(Debug, Clone, PartialEq, Bindable)]
pub enum Bind {
    Null,
    String(String),
    #[bindable(ignore)]
    StaticString(&'static str),
    Bool(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    #[cfg(feature = "uuid")]
    Uuid(uuid::Uuid),
    #[cfg(feature = "chrono")]
    Date(chrono::NaiveDate),
    #[cfg(feature = "chrono")]
    DateTime(chrono::NaiveDateTime),
    #[cfg(feature = "chrono")]
    DateTimeUtc(chrono::DateTime<chrono::Utc>),
    #[cfg(feature = "json")]
    Json(serde_json::Value),
}

impl Bind {
    pub fn is_null(&self) -> bool {
        matches!(self, Bind::Null)
    }
}

pub trait IntoBind {
    fn into_bind(self) -> Bind;
}

impl<T> IntoBind for Option<T>
where
    T: IntoBind,
{
    fn into_bind(self) -> Bind {
        if let Some(value) = self {
            value.into_bind()
        } else {
            Bind::Null
        }
    }
}

impl IntoBind for &str {
    fn into_bind(self) -> Bind {
        Bind::String(self.to_owned())
    }
}

impl IntoBind for &String {
    fn into_bind(self) -> Bind {
        Bind::String(self.clone())
    }
}

/// Bound values keyed by their 1-based position.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params(IndexMap<u32, Bind>);

impl Params {
    pub(crate) fn insert(&mut self, position: u32, value: Bind) {
        self.0.insert(position, value);
    }

    pub fn get(&self, position: u32) -> Option<&Bind> {
        self.0.get(&position)
    }

    /// Positions and values in insertion order, which is also positional order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Bind)> {
        self.0.iter().map(|(position, bind)| (*position, bind))
    }

    pub fn values(&self) -> impl Iterator<Item = &Bind> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_bind_scalars() {
        assert_eq!(Bind::I32(5), 5i32.into_bind());
        assert_eq!(Bind::I64(5), 5i64.into_bind());
        assert_eq!(Bind::Bool(true), true.into_bind());
        assert_eq!(Bind::String("open".into()), "open".into_bind());
        assert_eq!(Bind::String("open".into()), String::from("open").into_bind());
        assert_eq!(Bind::F64(1.5), 1.5f64.into_bind());
    }

    #[test]
    fn test_borrowed_str_into_bind() {
        let request = String::from("shipped");
        let borrowed: &str = request.as_str();
        assert_eq!(Bind::String("shipped".into()), borrowed.into_bind());
        assert_eq!(Bind::String("shipped".into()), (&request).into_bind());
        assert_eq!(Bind::String("shipped".into()), Some(borrowed).into_bind());
    }

    #[test]
    fn test_option_into_bind() {
        assert!(None::<i32>.into_bind().is_null());
        assert_eq!(Bind::I32(1), Some(1i32).into_bind());
        assert_eq!(Bind::Null, Bind::Null.into_bind());
    }

    #[test]
    fn test_from_value() {
        let bind: Bind = 7i16.into();
        assert_eq!(Bind::I16(7), bind);
    }

    #[test]
    fn test_params_keep_positional_order() {
        let mut params = Params::default();
        params.insert(1, Bind::I32(10));
        params.insert(2, Bind::StaticString("x"));
        let positions: Vec<u32> = params.iter().map(|(position, _)| position).collect();
        assert_eq!(vec![1, 2], positions);
        assert_eq!(Some(&Bind::I32(10)), params.get(1));
        assert_eq!(None, params.get(3));
    }
}
