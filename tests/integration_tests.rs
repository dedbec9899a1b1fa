use fixvec::{FixVec, FixVecError};

#[test]
fn test_erase_middle_element() {
    let mut vec = FixVec::new(5).unwrap();
    vec.push(10).unwrap();
    vec.push(20).unwrap();
    vec.push(30).unwrap();

    let next = vec.erase(1);

    assert_eq!(vec, [10, 30]);
    assert_eq!(vec.len(), 2);
    assert_eq!(next, 1);
    assert_eq!(vec[next], 30);
}

#[test]
fn test_erase_last_returns_end() {
    let mut vec = FixVec::from_slice(3, &[1, 2, 3]).unwrap();

    let next = vec.erase(2);

    assert_eq!(next, vec.len());
    assert_eq!(vec, [1, 2]);
}

#[test]
fn test_erase_drops_exactly_the_erased_element() {
    let mut vec = FixVec::new(3).unwrap();
    vec.push(String::from("keep")).unwrap();
    vec.push(String::from("drop")).unwrap();
    vec.push(String::from("also keep")).unwrap();

    vec.erase(1);

    assert_eq!(vec, ["keep", "also keep"].map(String::from));
}

#[test]
#[should_panic(expected = "position 3 out of range for FixVec of length 3")]
fn test_erase_out_of_range() {
    let mut vec = FixVec::from_slice(4, &[1, 2, 3]).unwrap();
    vec.erase(3);
}

#[test]
fn test_insert_at_front_middle_and_end() {
    let mut vec = FixVec::from_slice(6, &[2, 4]).unwrap();

    assert_eq!(vec.insert(0, 1).unwrap(), 0);
    assert_eq!(vec, [1, 2, 4]);

    assert_eq!(vec.insert(2, 3).unwrap(), 2);
    assert_eq!(vec, [1, 2, 3, 4]);

    let end = vec.len();
    assert_eq!(vec.insert(end, 5).unwrap(), 4);
    assert_eq!(vec, [1, 2, 3, 4, 5]);
}

#[test]
fn test_insert_into_empty() {
    let mut vec = FixVec::new(1).unwrap();

    assert_eq!(vec.insert(0, 'x').unwrap(), 0);
    assert_eq!(vec, ['x']);
}

#[test]
fn test_insert_when_full() {
    let mut vec = FixVec::from_slice(2, &[1, 2]).unwrap();

    assert_eq!(
        vec.insert(0, 0),
        Err(FixVecError::CapacityExceeded {
            requested: 3,
            capacity: 2
        })
    );
    assert_eq!(vec, [1, 2]);
}

#[test]
#[should_panic(expected = "insert position 3 out of range for FixVec of length 2")]
fn test_insert_past_end() {
    let mut vec = FixVec::from_slice(4, &[1, 2]).unwrap();
    let _ = vec.insert(3, 9);
}

#[test]
fn test_insert_then_erase_restores_sequence() {
    let original = [5, 6, 7, 8];

    for position in 0..=original.len() {
        let mut vec = FixVec::from_slice(5, &original).unwrap();

        let at = vec.insert(position, 99).unwrap();
        assert_eq!(vec[at], 99);
        vec.erase(at);

        assert_eq!(vec, original, "position {position}");
    }
}

#[test]
fn test_remove_returns_value_and_shifts() {
    let mut vec = FixVec::from_slice(4, &["a", "b", "c", "d"]).unwrap();

    assert_eq!(vec.remove(1), "b");
    assert_eq!(vec, ["a", "c", "d"]);
    assert_eq!(vec.remove(2), "d");
    assert_eq!(vec, ["a", "c"]);
}

#[test]
fn test_resize_grow_and_shrink() {
    let mut vec = FixVec::from_slice(6, &[1, 2]).unwrap();

    vec.resize(5, 7).unwrap();
    assert_eq!(vec, [1, 2, 7, 7, 7]);

    vec.resize(1, 0).unwrap();
    assert_eq!(vec, [1]);

    vec.resize(1, 0).unwrap();
    assert_eq!(vec, [1]);

    vec.resize(6, 3).unwrap();
    assert_eq!(vec.len(), 6);
    assert!(vec.is_full());
}

#[test]
fn test_resize_beyond_capacity_is_rejected() {
    let mut vec = FixVec::from_slice(3, &[1, 2]).unwrap();

    assert_eq!(
        vec.resize(4, 0),
        Err(FixVecError::CapacityExceeded {
            requested: 4,
            capacity: 3
        })
    );
    assert_eq!(vec, [1, 2]);

    // shrinking requests beyond capacity are rejected too, not partially applied
    assert!(vec.resize(10, 0).is_err());
    assert_eq!(vec.len(), 2);
}

#[test]
fn test_resize_default() {
    let mut vec: FixVec<String> = FixVec::new(3).unwrap();

    vec.resize_default(2).unwrap();
    assert_eq!(vec, [String::new(), String::new()]);

    assert!(vec.resize_default(4).is_err());
    assert_eq!(vec.len(), 2);
}

#[test]
fn test_truncate() {
    let mut vec = FixVec::from_slice(4, &[String::from("a"), String::from("b")]).unwrap();

    vec.truncate(5);
    assert_eq!(vec.len(), 2);
    vec.truncate(1);
    assert_eq!(vec, [String::from("a")]);
}

#[test]
fn test_indexing_and_slices() {
    let mut vec = FixVec::from_slice(4, &[3, 1, 2]).unwrap();

    assert_eq!(vec[0], 3);
    vec[0] = 4;
    vec.sort_unstable();
    assert_eq!(vec, [1, 2, 4]);
    assert_eq!(vec.get(3), None);
    assert_eq!(unsafe { *vec.get_unchecked(2) }, 4);
}

#[test]
#[should_panic]
fn test_index_out_of_range_panics() {
    let vec = FixVec::from_slice(4, &[1, 2]).unwrap();
    let _ = vec[2];
}

#[test]
fn test_zero_sized_elements() {
    let mut vec = FixVec::new(3).unwrap();

    vec.push(()).unwrap();
    vec.push(()).unwrap();
    vec.insert(0, ()).unwrap();
    assert!(vec.push(()).is_err());
    assert_eq!(vec.len(), 3);

    vec.erase(1);
    assert_eq!(vec.len(), 2);
}

#[test]
fn test_max_size() {
    let vec: FixVec<u64> = FixVec::new(1).unwrap();
    assert_eq!(vec.max_size(), isize::MAX as usize / 8);
}

#[test]
fn test_capacity_overflow_reported() {
    let result: Result<FixVec<u64>, _> = FixVec::new(usize::MAX);

    assert_eq!(
        result.unwrap_err(),
        FixVecError::CapacityOverflow {
            capacity: usize::MAX
        }
    );
}
