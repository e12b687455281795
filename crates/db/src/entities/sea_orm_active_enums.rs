//! `SeaORM` active enums mirroring the Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use shiftpay_core::allowance::EntryType as CoreEntryType;
use shiftpay_core::auth::UserRole as CoreUserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[sea_orm(string_value = "employee")]
    Employee,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_type")]
pub enum EntryType {
    #[sea_orm(string_value = "6am")]
    #[serde(rename = "6am")]
    SixAm,
    #[sea_orm(string_value = "9am")]
    #[serde(rename = "9am")]
    NineAm,
    #[sea_orm(string_value = "1pm")]
    #[serde(rename = "1pm")]
    OnePm,
    #[sea_orm(string_value = "5pm")]
    #[serde(rename = "5pm")]
    FivePm,
    #[sea_orm(string_value = "9pm")]
    #[serde(rename = "9pm")]
    NinePm,
    #[sea_orm(string_value = "oncall")]
    #[serde(rename = "oncall")]
    OnCall,
    #[sea_orm(string_value = "patch_full")]
    #[serde(rename = "patch_full")]
    PatchFull,
    #[sea_orm(string_value = "patch_half")]
    #[serde(rename = "patch_half")]
    PatchHalf,
    #[sea_orm(string_value = "activity_full")]
    #[serde(rename = "activity_full")]
    ActivityFull,
    #[sea_orm(string_value = "activity_half")]
    #[serde(rename = "activity_half")]
    ActivityHalf,
    #[sea_orm(string_value = "leave")]
    #[serde(rename = "leave")]
    Leave,
    #[sea_orm(string_value = "weekend")]
    #[serde(rename = "weekend")]
    Weekend,
    #[sea_orm(string_value = "holiday")]
    #[serde(rename = "holiday")]
    Holiday,
}

impl From<CoreUserRole> for UserRole {
    fn from(role: CoreUserRole) -> Self {
        match role {
            CoreUserRole::Employee => Self::Employee,
            CoreUserRole::Manager => Self::Manager,
            CoreUserRole::Admin => Self::Admin,
        }
    }
}

impl From<UserRole> for CoreUserRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Employee => Self::Employee,
            UserRole::Manager => Self::Manager,
            UserRole::Admin => Self::Admin,
        }
    }
}

impl From<CoreEntryType> for EntryType {
    fn from(t: CoreEntryType) -> Self {
        match t {
            CoreEntryType::SixAm => Self::SixAm,
            CoreEntryType::NineAm => Self::NineAm,
            CoreEntryType::OnePm => Self::OnePm,
            CoreEntryType::FivePm => Self::FivePm,
            CoreEntryType::NinePm => Self::NinePm,
            CoreEntryType::OnCall => Self::OnCall,
            CoreEntryType::PatchFull => Self::PatchFull,
            CoreEntryType::PatchHalf => Self::PatchHalf,
            CoreEntryType::ActivityFull => Self::ActivityFull,
            CoreEntryType::ActivityHalf => Self::ActivityHalf,
            CoreEntryType::Leave => Self::Leave,
            CoreEntryType::Weekend => Self::Weekend,
            CoreEntryType::Holiday => Self::Holiday,
        }
    }
}

impl From<EntryType> for CoreEntryType {
    fn from(t: EntryType) -> Self {
        match t {
            EntryType::SixAm => Self::SixAm,
            EntryType::NineAm => Self::NineAm,
            EntryType::OnePm => Self::OnePm,
            EntryType::FivePm => Self::FivePm,
            EntryType::NinePm => Self::NinePm,
            EntryType::OnCall => Self::OnCall,
            EntryType::PatchFull => Self::PatchFull,
            EntryType::PatchHalf => Self::PatchHalf,
            EntryType::ActivityFull => Self::ActivityFull,
            EntryType::ActivityHalf => Self::ActivityHalf,
            EntryType::Leave => Self::Leave,
            EntryType::Weekend => Self::Weekend,
            EntryType::Holiday => Self::Holiday,
        }
    }
}
