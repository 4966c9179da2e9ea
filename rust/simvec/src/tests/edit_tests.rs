use simvec_testkit::elements::NonCopyable;

use crate::{SimpleVector, simvec};

#[test]
fn insert_then_erase_example() {
    let mut v = simvec![1, 2, 3];
    let inserted = v.insert(1, 9);
    assert_eq!(*inserted, 9);
    *inserted = 10;
    assert_eq!(v, [1, 10, 2, 3]);
    assert_eq!(v.len(), 4);

    v[1] = 9;
    let next = v.erase(1);
    assert_eq!(next, 1);
    assert_eq!(v[next], 2);
    assert_eq!(v, [1, 2, 3]);
}

#[test]
fn insert_at_front_middle_and_end() {
    let mut v = SimpleVector::new();
    v.insert(0, 2);
    v.insert(0, 1);
    v.insert(2, 4);
    v.insert(2, 3);
    assert_eq!(v, [1, 2, 3, 4]);
}

#[test]
fn insert_into_empty_grows_to_one() {
    let mut v = SimpleVector::new();
    v.insert(0, 'a');
    assert_eq!(v.capacity(), 1);
    v.insert(0, 'b');
    assert_eq!(v.capacity(), 2);
    v.insert(1, 'c');
    assert_eq!(v.capacity(), 4);
    assert_eq!(v, ['b', 'c', 'a']);
}

#[test]
fn insert_within_capacity_does_not_reallocate() {
    let mut v = SimpleVector::with_capacity(4);
    v.push_back(1);
    v.push_back(3);
    let ptr = v.as_ptr();
    v.insert(1, 2);
    assert_eq!(v.as_ptr(), ptr);
    assert_eq!(v, [1, 2, 3]);
}

#[test]
#[should_panic(expected = "insertion index (is 4) should be <= len (is 3)")]
fn insert_past_end_panics() {
    let mut v = simvec![1, 2, 3];
    v.insert(4, 0);
}

#[test]
fn erase_last_returns_end() {
    let mut v = simvec![1, 2, 3];
    let next = v.erase(2);
    assert_eq!(next, v.len());
    assert_eq!(v, [1, 2]);
}

#[test]
fn erase_front() {
    let mut v = simvec![String::from("a"), String::from("b"), String::from("c")];
    assert_eq!(v.erase(0), 0);
    assert_eq!(v, [String::from("b"), String::from("c")]);
}

#[test]
#[should_panic(expected = "removal index (is 0) should be < len (is 0)")]
fn erase_from_empty_panics() {
    let mut v = SimpleVector::<i32>::new();
    v.erase(0);
}

#[test]
fn remove_returns_element() {
    let mut v = simvec![10, 20, 30];
    assert_eq!(v.remove(1), 20);
    assert_eq!(v, [10, 30]);
}

#[test]
fn pop_back_moves_nothing_else() {
    let mut v = simvec![1, 2, 3];
    let ptr = v.as_ptr();
    assert_eq!(v.pop_back(), Some(3));
    assert_eq!(v, [1, 2]);
    assert_eq!(v.capacity(), 3);
    assert_eq!(v.as_ptr(), ptr);
    assert_eq!(v.pop_back(), Some(2));
    assert_eq!(v.pop_back(), Some(1));
    assert_eq!(v.pop_back(), None);
    assert!(v.is_empty());
}

#[test]
fn insert_then_erase_is_identity() {
    for len in 0..20usize {
        let original: SimpleVector<usize> = (0..len).collect();
        for pos in 0..=len {
            let mut v = original.clone();
            v.insert(pos, usize::MAX);
            assert_eq!(v[pos], usize::MAX);
            v.erase(pos);
            assert_eq!(v, original);
        }
    }
}

#[test]
fn checked_access() {
    let mut v = simvec![1, 2, 3];
    assert_eq!(*v.at(0).unwrap(), 1);
    assert_eq!(*v.at(2).unwrap(), 3);
    *v.at_mut(1).unwrap() = 5;
    assert_eq!(v, [1, 5, 3]);

    let err = v.at(3).unwrap_err();
    assert!(err.is_index_out_of_range());
    assert_eq!(err.to_string(), "index 3 is out of range for length 3");
    assert!(v.at_mut(100).is_err());
}

#[test]
fn checked_access_on_empty_always_fails() {
    let v = SimpleVector::<i32>::new();
    for index in [0, 1, 7, usize::MAX] {
        assert!(v.at(index).unwrap_err().is_index_out_of_range());
    }

    let mut v = SimpleVector::<i32>::with_capacity(4);
    assert!(v.at(0).is_err());
    v.push_back(1);
    v.clear();
    assert!(v.at(0).is_err());
}

#[test]
fn unchecked_access() {
    let mut v = simvec![1, 2, 3];
    assert_eq!(unsafe { *v.get_unchecked(1) }, 2);
    unsafe { *v.get_unchecked_mut(2) = 7 };
    assert_eq!(v[2], 7);
}

#[test]
fn iteration() {
    let mut v = simvec![1, 2, 3];
    for x in &mut v {
        *x *= 2;
    }
    let collected: Vec<i32> = (&v).into_iter().copied().collect();
    assert_eq!(collected, [2, 4, 6]);
    assert_eq!(v.iter().rev().copied().collect::<Vec<_>>(), [6, 4, 2]);
    assert_eq!(v.into_iter().sum::<i32>(), 12);
}

#[test]
fn extend_appends_in_order() {
    let mut v = simvec![1];
    v.extend([2, 3, 4]);
    v.extend((5..7).filter(|_| true));
    assert_eq!(v, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn move_only_push_back() {
    let mut v = SimpleVector::new();
    for i in 0..10 {
        v.push_back(NonCopyable::new(i));
    }
    assert_eq!(v.len(), 10);
    for (i, x) in v.iter().enumerate() {
        assert_eq!(x.value(), i);
    }
}

#[test]
fn move_only_insert() {
    let mut v = SimpleVector::new();
    for i in 0..5 {
        v.push_back(NonCopyable::new(i));
    }
    v.insert(0, NonCopyable::new(100));
    assert_eq!(v[0].value(), 100);
    assert_eq!(v[1].value(), 0);

    let end = v.len();
    v.insert(end, NonCopyable::new(200));
    assert_eq!(v[end].value(), 200);

    v.insert(3, NonCopyable::new(300));
    let values: Vec<usize> = v.iter().map(NonCopyable::value).collect();
    assert_eq!(values, [100, 0, 1, 300, 2, 3, 4, 200]);
}

#[test]
fn move_only_erase() {
    let mut v: SimpleVector<NonCopyable> = (0..5).map(NonCopyable::new).collect();
    let next = v.erase(2);
    assert_eq!(next, 2);
    assert_eq!(v[next].value(), 3);
    let values: Vec<usize> = v.iter().map(NonCopyable::value).collect();
    assert_eq!(values, [0, 1, 3, 4]);
}

#[test]
fn move_only_remove_and_pop() {
    let mut v: SimpleVector<NonCopyable> = (0..3).map(NonCopyable::new).collect();
    assert_eq!(v.remove(0), NonCopyable::new(0));
    assert_eq!(v.pop_back(), Some(NonCopyable::new(2)));
    assert_eq!(v.len(), 1);
}
