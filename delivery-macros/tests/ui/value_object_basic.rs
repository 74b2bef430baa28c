use delivery_macros::value_object;

#[value_object]
#[derive(Copy)]
struct Weight {
    grams: u32,
}

#[value_object(debug = false)]
struct Opaque(i32);

#[value_object]
enum Size {
    Small,
    Large,
}

fn main() {
    // Debug 默认开启，应可格式化
    let w = Weight { grams: 10 };
    let _ = format!("{:?}", w);

    // Copy/PartialEq/Hash 可用（编译期检查足矣）
    let copied = w;
    assert!(copied == w);
    let mut set = std::collections::HashSet::new();
    set.insert(Size::Small);
    assert!(!set.contains(&Size::Large));

    let _ = Opaque(1) == Opaque(1);
}
