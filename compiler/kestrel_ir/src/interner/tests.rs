use super::*;

#[test]
fn test_intern_and_lookup() {
    let interner = StringInterner::new();

    let hello = interner.intern("hello");
    let world = interner.intern("world");
    let hello2 = interner.intern("hello");

    assert_eq!(hello, hello2);
    assert_ne!(hello, world);

    assert_eq!(interner.lookup(hello), "hello");
    assert_eq!(interner.lookup(world), "world");
}

#[test]
fn test_empty_string() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_common_names_pre_interned() {
    let interner = StringInterner::new();
    let before = interner.len();
    let int = interner.intern("int");
    let plus = interner.intern("+");
    assert_eq!(interner.len(), before);
    assert_eq!(interner.lookup(int), "int");
    assert_eq!(interner.lookup(plus), "+");
}

#[test]
fn test_get_does_not_intern() {
    let interner = StringInterner::new();
    assert_eq!(interner.get("not_there"), None);
    let before = interner.len();
    assert_eq!(interner.get("not_there"), None);
    assert_eq!(interner.len(), before);
}

#[test]
fn test_foreign_name_resolves_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(u32::MAX)), "");
}

#[test]
fn test_shared_interner() {
    let interner = SharedInterner::new();
    let interner2 = interner.clone();

    let name1 = interner.intern("shared");
    let name2 = interner2.intern("shared");

    assert_eq!(name1, name2);
}

#[test]
fn test_shared_interner_across_threads() {
    let interner = SharedInterner::new();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let interner = interner.clone();
            std::thread::spawn(move || interner.intern("concurrent"))
        })
        .collect();
    let names: Vec<Name> = handles
        .into_iter()
        .map(|h| h.join().unwrap_or(Name::EMPTY))
        .collect();
    assert!(names.iter().all(|n| *n == names[0]));
    assert_eq!(interner.lookup(names[0]), "concurrent");
}
