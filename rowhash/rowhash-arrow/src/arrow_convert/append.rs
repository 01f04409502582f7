use arrow::{
    array::{
        ArrayBuilder, BinaryBuilder, BooleanBuilder, Date32Builder, Date64Builder,
        Decimal128Builder, Float32Builder, Float64Builder, Int8Builder, Int16Builder,
        Int32Builder, Int64Builder, LargeStringBuilder, StringBuilder,
        TimestampMicrosecondBuilder, TimestampMillisecondBuilder, TimestampNanosecondBuilder,
        TimestampSecondBuilder, UInt8Builder, UInt16Builder, UInt32Builder,
    },
    datatypes::{DataType, TimeUnit},
};
use chrono::NaiveDateTime;
use rowhash_core::Value;

use crate::{SECONDS_PER_DAY, error::ArrowConvertError};

macro_rules! cast_builder {
    ($b:expr, $T:ty) => {
        $b.as_any_mut()
            .downcast_mut::<$T>()
            .expect(concat!("expected builder type: ", stringify!($T)))
    };
}

/// Append `value` to a builder created by `make_builder` for `dt`.
pub(super) fn append_value_to_builder(
    builder: &mut Box<dyn ArrayBuilder>,
    column: &str,
    dt: &DataType,
    value: &Value,
) -> Result<(), ArrowConvertError> {
    let mismatch = |e| ArrowConvertError::value_type(column, e);

    match dt {
        DataType::Boolean => cast_builder!(builder, BooleanBuilder)
            .append_option(value.try_bool().map_err(mismatch)?),
        DataType::Int8 => {
            cast_builder!(builder, Int8Builder).append_option(integer(column, dt, value)?)
        }
        DataType::Int16 => {
            cast_builder!(builder, Int16Builder).append_option(integer(column, dt, value)?)
        }
        DataType::Int32 => {
            cast_builder!(builder, Int32Builder).append_option(integer(column, dt, value)?)
        }
        DataType::Int64 => {
            cast_builder!(builder, Int64Builder).append_option(value.try_i64().map_err(mismatch)?)
        }
        DataType::UInt8 => {
            cast_builder!(builder, UInt8Builder).append_option(integer(column, dt, value)?)
        }
        DataType::UInt16 => {
            cast_builder!(builder, UInt16Builder).append_option(integer(column, dt, value)?)
        }
        DataType::UInt32 => {
            cast_builder!(builder, UInt32Builder).append_option(integer(column, dt, value)?)
        }
        DataType::Float32 => cast_builder!(builder, Float32Builder)
            .append_option(value.try_f64().map_err(mismatch)?.map(|v| v as f32)),
        DataType::Float64 => cast_builder!(builder, Float64Builder)
            .append_option(value.try_f64().map_err(mismatch)?),
        DataType::Decimal128(_, scale) => cast_builder!(builder, Decimal128Builder)
            .append_option(decimal(column, dt, *scale, value)?),
        DataType::Date32 => {
            let days = date(column, dt, value, |d| {
                i32::try_from(d.and_utc().timestamp().div_euclid(SECONDS_PER_DAY)).ok()
            })?;
            cast_builder!(builder, Date32Builder).append_option(days)
        }
        DataType::Date64 => {
            let millis = date(column, dt, value, |d| Some(d.and_utc().timestamp_millis()))?;
            cast_builder!(builder, Date64Builder).append_option(millis)
        }
        DataType::Timestamp(unit, None) => match unit {
            TimeUnit::Second => {
                let v = date(column, dt, value, |d| Some(d.and_utc().timestamp()))?;
                cast_builder!(builder, TimestampSecondBuilder).append_option(v)
            }
            TimeUnit::Millisecond => {
                let v = date(column, dt, value, |d| Some(d.and_utc().timestamp_millis()))?;
                cast_builder!(builder, TimestampMillisecondBuilder).append_option(v)
            }
            TimeUnit::Microsecond => {
                let v = date(column, dt, value, |d| Some(d.and_utc().timestamp_micros()))?;
                cast_builder!(builder, TimestampMicrosecondBuilder).append_option(v)
            }
            TimeUnit::Nanosecond => {
                let v = date(column, dt, value, |d| d.and_utc().timestamp_nanos_opt())?;
                cast_builder!(builder, TimestampNanosecondBuilder).append_option(v)
            }
        },
        DataType::Utf8 => {
            cast_builder!(builder, StringBuilder).append_option(value.try_str().map_err(mismatch)?)
        }
        DataType::LargeUtf8 => cast_builder!(builder, LargeStringBuilder)
            .append_option(value.try_str().map_err(mismatch)?),
        DataType::Binary => cast_builder!(builder, BinaryBuilder)
            .append_option(value.try_bytes().map_err(mismatch)?),
        other => return Err(ArrowConvertError::unsupported(column, other)),
    }
    Ok(())
}

fn integer<T: TryFrom<i64>>(
    column: &str,
    dt: &DataType,
    value: &Value,
) -> Result<Option<T>, ArrowConvertError> {
    match value
        .try_i64()
        .map_err(|e| ArrowConvertError::value_type(column, e))?
    {
        Some(v) => T::try_from(v)
            .map(Some)
            .map_err(|_| ArrowConvertError::out_of_range(column, v, dt)),
        None => Ok(None),
    }
}

/// Unscaled value at the column's scale; digits are never dropped.
fn decimal(
    column: &str,
    dt: &DataType,
    scale: i8,
    value: &Value,
) -> Result<Option<i128>, ArrowConvertError> {
    let Some(decimal) = value
        .try_decimal()
        .map_err(|e| ArrowConvertError::value_type(column, e))?
    else {
        return Ok(None);
    };
    u32::try_from(scale)
        .ok()
        .and_then(|scale| decimal.rescale(scale))
        .map(|rescaled| Some(rescaled.unscaled))
        .ok_or_else(|| ArrowConvertError::out_of_range(column, decimal, dt))
}

fn date<T>(
    column: &str,
    dt: &DataType,
    value: &Value,
    convert: impl FnOnce(NaiveDateTime) -> Option<T>,
) -> Result<Option<T>, ArrowConvertError> {
    let Some(date) = value
        .try_date()
        .map_err(|e| ArrowConvertError::value_type(column, e))?
    else {
        return Ok(None);
    };
    convert(date)
        .map(Some)
        .ok_or_else(|| ArrowConvertError::out_of_range(column, date, dt))
}
