use delivery_macros::entity_id;
use uuid::Uuid;

#[entity_id]
struct ParcelId(Uuid);

#[entity_id(debug = false)]
struct SecretId(Uuid);

impl std::fmt::Debug for SecretId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretId(..)")
    }
}

fn main() {
    let id = ParcelId::generate();
    assert!(!id.is_nil());
    assert!(ParcelId::nil().is_nil());

    // Display 与 FromStr 互逆
    let parsed: ParcelId = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);

    // Copy 语义
    let copied = id;
    let _ = format!("{:?} {:?}", id, copied);

    let raw: Uuid = id.into();
    assert_eq!(ParcelId::from(raw), id);

    let secret = SecretId::new(Uuid::new_v4());
    let _ = format!("{:?}", secret); // 使用手写 Debug
}
