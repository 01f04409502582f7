use std::sync::Arc;

use arrow::{
    array::{Array, AsArray},
    datatypes::{
        DataType, Date32Type, Date64Type, Decimal128Type, Float32Type, Float64Type, Int8Type,
        Int16Type, Int32Type, Int64Type, TimeUnit, TimestampMicrosecondType,
        TimestampMillisecondType, TimestampNanosecondType, TimestampSecondType, UInt8Type,
        UInt16Type, UInt32Type,
    },
};
use chrono::{DateTime, NaiveDateTime};
use rowhash_core::{Decimal, Value};

use crate::{SECONDS_PER_DAY, error::ArrowConvertError};

/// Read every slot of `array` as a [`Value`]; Arrow nulls become `Value::Null`.
pub(super) fn array_values(column: &str, array: &dyn Array) -> Result<Vec<Value>, ArrowConvertError> {
    let dt = array.data_type();
    Ok(match dt {
        DataType::Boolean => collect(array.as_boolean().iter(), Value::Bool),
        DataType::Int8 => collect(array.as_primitive::<Int8Type>().iter(), |v| {
            Value::Integer(v.into())
        }),
        DataType::Int16 => collect(array.as_primitive::<Int16Type>().iter(), |v| {
            Value::Integer(v.into())
        }),
        DataType::Int32 => collect(array.as_primitive::<Int32Type>().iter(), Value::Integer),
        DataType::UInt8 => collect(array.as_primitive::<UInt8Type>().iter(), |v| {
            Value::Integer(v.into())
        }),
        DataType::UInt16 => collect(array.as_primitive::<UInt16Type>().iter(), |v| {
            Value::Integer(v.into())
        }),
        DataType::UInt32 => collect(array.as_primitive::<UInt32Type>().iter(), |v| {
            Value::Long(v.into())
        }),
        DataType::Int64 => collect(array.as_primitive::<Int64Type>().iter(), Value::Long),
        DataType::Float32 => collect(array.as_primitive::<Float32Type>().iter(), |v| {
            Value::F64(v.into())
        }),
        DataType::Float64 => collect(array.as_primitive::<Float64Type>().iter(), Value::F64),
        DataType::Decimal128(_, scale) => {
            let scale =
                u32::try_from(*scale).map_err(|_| ArrowConvertError::unsupported(column, dt))?;
            collect(array.as_primitive::<Decimal128Type>().iter(), |v| {
                Value::Decimal(Decimal::new(v, scale))
            })
        }
        DataType::Date32 => dates(column, dt, array.as_primitive::<Date32Type>().iter(), |days| {
            from_epoch_seconds(i64::from(days) * SECONDS_PER_DAY)
        })?,
        DataType::Date64 => dates(column, dt, array.as_primitive::<Date64Type>().iter(), |ms| {
            DateTime::from_timestamp_millis(ms).map(|d| d.naive_utc())
        })?,
        DataType::Timestamp(unit, None) => match unit {
            TimeUnit::Second => dates(
                column,
                dt,
                array.as_primitive::<TimestampSecondType>().iter(),
                from_epoch_seconds,
            )?,
            TimeUnit::Millisecond => dates(
                column,
                dt,
                array.as_primitive::<TimestampMillisecondType>().iter(),
                |ms| DateTime::from_timestamp_millis(ms).map(|d| d.naive_utc()),
            )?,
            TimeUnit::Microsecond => dates(
                column,
                dt,
                array.as_primitive::<TimestampMicrosecondType>().iter(),
                |us| DateTime::from_timestamp_micros(us).map(|d| d.naive_utc()),
            )?,
            TimeUnit::Nanosecond => dates(
                column,
                dt,
                array.as_primitive::<TimestampNanosecondType>().iter(),
                |ns| Some(DateTime::from_timestamp_nanos(ns).naive_utc()),
            )?,
        },
        DataType::Utf8 => collect(array.as_string::<i32>().iter(), Value::string),
        DataType::LargeUtf8 => collect(array.as_string::<i64>().iter(), Value::string),
        DataType::Binary => collect(array.as_binary::<i32>().iter(), |b| {
            Value::Bytes(Arc::from(b))
        }),
        other => return Err(ArrowConvertError::unsupported(column, other)),
    })
}

fn collect<T>(slots: impl Iterator<Item = Option<T>>, to_value: impl Fn(T) -> Value) -> Vec<Value> {
    slots.map(|v| v.map_or(Value::Null, &to_value)).collect()
}

fn dates<T: ToString + Copy>(
    column: &str,
    dt: &DataType,
    slots: impl Iterator<Item = Option<T>>,
    to_date: impl Fn(T) -> Option<NaiveDateTime>,
) -> Result<Vec<Value>, ArrowConvertError> {
    slots
        .map(|slot| match slot {
            None => Ok(Value::Null),
            Some(raw) => to_date(raw)
                .map(Value::Date)
                .ok_or_else(|| ArrowConvertError::out_of_range(column, raw, dt)),
        })
        .collect()
}

fn from_epoch_seconds(seconds: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(seconds, 0).map(|d| d.naive_utc())
}
