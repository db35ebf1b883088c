/// Builds a [`Parameters`](crate::Parameters) map from `key => value`
/// pairs.
///
/// Values are anything convertible into a
/// [`BareItem`](crate::BareItem); use
/// [`BareItem::token`](crate::BareItem::token) when a token is wanted
/// instead of a string.
///
/// ```rust
/// use structured_fields::{params, BareItem};
///
/// let params = params! {
///     "q" => 0.5,
///     "v" => BareItem::token("abc"),
///     "flag" => true,
/// };
/// assert_eq!(params.len(), 3);
/// assert_eq!(params.get("q"), Some(&BareItem::Decimal(0.5)));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Parameters::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::Parameters::new();
        $(
            params.insert($key.to_string(), $crate::BareItem::from($value));
        )+
        params
    }};
}

/// Builds a [`Dictionary`](crate::Dictionary) from `key => member` pairs.
///
/// Members are anything convertible into a
/// [`ListEntry`](crate::ListEntry): a bare item, an
/// [`Item`](crate::Item), or an [`InnerList`](crate::InnerList).
///
/// ```rust
/// use structured_fields::{dictionary, to_string, BareItem, InnerList, Item};
///
/// let dict = dictionary! {
///     "a" => BareItem::Integer(1),
///     "b" => InnerList::new(vec![Item::new(BareItem::Integer(2))]),
/// };
/// assert_eq!(to_string(&dict).unwrap(), "a=1, b=(2)");
/// ```
#[macro_export]
macro_rules! dictionary {
    () => {
        $crate::Dictionary::new()
    };
    ($($key:expr => $member:expr),+ $(,)?) => {{
        let mut dict = $crate::Dictionary::new();
        $(
            dict.insert($key.to_string(), $crate::ListEntry::from($member));
        )+
        dict
    }};
}
