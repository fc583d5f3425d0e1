mod common;

use chrono::NaiveDate;
use tabframe::{Column, Error, Reduction, Value, ValueType};

use common::{floats, ints};

#[test]
fn test_append_rejects_wrong_type() {
    let mut column = Column::new("amount", ValueType::Int);
    column.append(Value::Int(1)).unwrap();

    let result = column.append(Value::Float(2.0));
    match result {
        Err(Error::TypeMismatch {
            column,
            expected,
            found,
        }) => {
            assert_eq!(column, "amount");
            assert_eq!(expected, ValueType::Int);
            assert_eq!(found, ValueType::Float);
        }
        other => panic!("Expected a TypeMismatch error, got {:?}", other),
    }
    assert_eq!(column.len(), 1);
}

#[test]
fn test_with_values_validates_every_element() {
    let values = vec![Value::Int(1), Value::from("two")];
    assert!(Column::with_values("mixed", ValueType::Int, values).is_err());
}

#[test]
fn test_get_out_of_range() {
    let column = Column::with_values("n", ValueType::Int, ints(&[1, 2, 3])).unwrap();
    assert_eq!(column.get(2).unwrap(), &Value::Int(3));
    assert!(matches!(
        column.get(3),
        Err(Error::IndexOutOfBounds { index: 3, size: 3 })
    ));
}

#[test]
fn test_clone_is_independent() {
    let original = Column::with_values("n", ValueType::Int, ints(&[1, 2])).unwrap();
    let mut copy = original.clone();
    copy.append(Value::Int(3)).unwrap();

    assert_eq!(original.len(), 2);
    assert_eq!(copy.len(), 3);
}

#[test]
fn test_empty_column_reductions_return_none() {
    for value_type in [ValueType::Int, ValueType::Float, ValueType::String] {
        let column = Column::new("empty", value_type);
        for op in Reduction::ALL {
            assert_eq!(column.reduce(op).unwrap(), None, "{} on {}", op, value_type);
        }
    }
}

#[test]
fn test_single_element_identities() {
    // 要素が1つの場合: SUM == MEAN == v, VAR == 0
    let column = Column::with_values("n", ValueType::Int, ints(&[7])).unwrap();
    assert_eq!(column.sum().unwrap(), Some(Value::Int(7)));
    assert_eq!(column.mean().unwrap(), Some(Value::Int(7)));
    assert_eq!(column.var().unwrap(), Some(Value::Int(0)));
    assert_eq!(column.std().unwrap(), Some(Value::Int(0)));

    let column = Column::with_values("x", ValueType::Float, floats(&[2.5])).unwrap();
    assert_eq!(column.sum().unwrap(), Some(Value::Float(2.5)));
    assert_eq!(column.mean().unwrap(), Some(Value::Float(2.5)));
    assert_eq!(column.var().unwrap(), Some(Value::Float(0.0)));
}

#[test]
fn test_integer_statistics() {
    let column =
        Column::with_values("n", ValueType::Int, ints(&[2, 4, 4, 4, 5, 5, 7, 9])).unwrap();

    assert_eq!(column.reduce(Reduction::Sum).unwrap(), Some(Value::Int(40)));
    assert_eq!(column.reduce(Reduction::Mean).unwrap(), Some(Value::Int(5)));
    assert_eq!(column.reduce(Reduction::Var).unwrap(), Some(Value::Int(4)));
    assert_eq!(column.reduce(Reduction::Std).unwrap(), Some(Value::Int(2)));
}

#[test]
fn test_float_statistics() {
    let column = Column::with_values(
        "x",
        ValueType::Float,
        floats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]),
    )
    .unwrap();

    assert_eq!(column.sum().unwrap(), Some(Value::Float(40.0)));
    assert_eq!(column.mean().unwrap(), Some(Value::Float(5.0)));
    assert_eq!(column.var().unwrap(), Some(Value::Float(4.0)));
    assert_eq!(column.std().unwrap(), Some(Value::Float(2.0)));
}

#[test]
fn test_integer_mean_truncates() {
    let column = Column::with_values("n", ValueType::Int, ints(&[1, 2])).unwrap();
    assert_eq!(column.mean().unwrap(), Some(Value::Int(1)));
}

// MIN/MAX direction is pinned here: `min` must pick the smallest element
// and `max` the largest, for every orderable type.
#[test]
fn test_min_returns_smallest_and_max_returns_largest() {
    let numbers = Column::with_values("n", ValueType::Int, ints(&[3, 1, 2])).unwrap();
    assert_eq!(numbers.min().unwrap(), Some(Value::Int(1)));
    assert_eq!(numbers.max().unwrap(), Some(Value::Int(3)));

    let words = Column::with_values(
        "w",
        ValueType::String,
        vec![Value::from("pear"), Value::from("apple"), Value::from("zoo")],
    )
    .unwrap();
    assert_eq!(words.min().unwrap(), Some(Value::from("apple")));
    assert_eq!(words.max().unwrap(), Some(Value::from("zoo")));

    let day = |d| {
        Value::DateTime(
            NaiveDate::from_ymd_opt(2024, 5, d)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        )
    };
    let days = Column::with_values("d", ValueType::DateTime, vec![day(9), day(2), day(30)]).unwrap();
    assert_eq!(days.min().unwrap(), Some(day(2)));
    assert_eq!(days.max().unwrap(), Some(day(30)));
}

#[test]
fn test_non_numeric_reductions_fail() {
    let words = Column::with_values(
        "w",
        ValueType::String,
        vec![Value::from("a"), Value::from("b")],
    )
    .unwrap();
    let when = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let days = Column::with_values("d", ValueType::DateTime, vec![Value::DateTime(when)]).unwrap();
    let word = Column::with_values("w", ValueType::String, vec![Value::from("a")]).unwrap();

    for column in [&words, &days, &word] {
        for op in [Reduction::Sum, Reduction::Mean, Reduction::Var, Reduction::Std] {
            let err = column.reduce(op).unwrap_err();
            assert!(err.is_type_capability(), "{} gave {}", op, err);
        }
    }
}

#[test]
fn test_sum_near_integer_limits() {
    // 真の合計が i64 に収まる限りオーバーフローしない
    let column = Column::with_values("n", ValueType::Int, ints(&[i64::MAX])).unwrap();
    assert_eq!(column.sum().unwrap(), Some(Value::Int(i64::MAX)));
    assert_eq!(column.mean().unwrap(), Some(Value::Int(i64::MAX)));
    assert_eq!(column.var().unwrap(), Some(Value::Int(0)));
    assert_eq!(column.std().unwrap(), Some(Value::Int(0)));

    let column = Column::with_values(
        "n",
        ValueType::Int,
        ints(&[5_000_000_000_000_000_000, -5_000_000_000_000_000_000]),
    )
    .unwrap();
    assert_eq!(column.sum().unwrap(), Some(Value::Int(0)));
    assert_eq!(column.mean().unwrap(), Some(Value::Int(0)));

    let column = Column::with_values("n", ValueType::Int, ints(&[i64::MIN, i64::MAX])).unwrap();
    assert_eq!(column.sum().unwrap(), Some(Value::Int(-1)));
}

#[test]
fn test_sum_overflow_is_reported() {
    let column = Column::with_values("n", ValueType::Int, ints(&[i64::MAX, 1])).unwrap();
    assert!(matches!(column.sum(), Err(Error::Overflow(_))));
}

#[test]
fn test_reduction_names() {
    assert_eq!("mean".parse::<Reduction>().unwrap(), Reduction::Mean);
    assert_eq!("STD".parse::<Reduction>().unwrap(), Reduction::Std);
    assert!("median".parse::<Reduction>().is_err());
    assert_eq!(Reduction::Var.to_string(), "var");

    assert!(!Reduction::Min.drops_non_reducible());
    assert!(!Reduction::Max.drops_non_reducible());
    assert!(Reduction::Sum.drops_non_reducible());
    assert!(Reduction::Std.drops_non_reducible());
}
