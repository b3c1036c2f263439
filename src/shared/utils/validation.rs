use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    pub fn validate_restaurant_name(name: &str) -> Result<(), AppError> {
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Restaurant name cannot be empty".to_string(),
            ));
        }
        if name.len() > 200 {
            return Err(AppError::ValidationError(
                "Restaurant name too long (max 200 characters)".to_string(),
            ));
        }
        Ok(())
    }

    /// End-user star rating on an interaction, whole stars only.
    pub fn validate_user_rating(rating: i32) -> Result<(), AppError> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::ValidationError(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_price_level(price_level: i32) -> Result<(), AppError> {
        if !(1..=5).contains(&price_level) {
            return Err(AppError::ValidationError(
                "Price level must be between 1 and 5".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_rating(rating: f32) -> Result<(), AppError> {
        if !(0.0..=5.0).contains(&rating) {
            return Err(AppError::ValidationError(
                "Rating must be between 0 and 5".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_persona_score(score: i32) -> Result<(), AppError> {
        if !(1..=10).contains(&score) {
            return Err(AppError::ValidationError(
                "Persona score must be between 1 and 10".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), AppError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::ValidationError(
                "Latitude must be between -90 and 90".to_string(),
            ));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(AppError::ValidationError(
                "Longitude must be between -180 and 180".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_pagination(offset: i64, limit: i64) -> Result<(), AppError> {
        if offset < 0 {
            return Err(AppError::ValidationError(
                "Offset cannot be negative".to_string(),
            ));
        }
        if limit <= 0 {
            return Err(AppError::ValidationError(
                "Limit must be positive".to_string(),
            ));
        }
        if limit > 100 {
            return Err(AppError::ValidationError(
                "Limit cannot exceed 100".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_rating_bounds() {
        assert!(Validator::validate_user_rating(0).is_err());
        assert!(Validator::validate_user_rating(6).is_err());
        for r in 1..=5 {
            assert!(Validator::validate_user_rating(r).is_ok());
        }
    }

    #[test]
    fn price_level_bounds() {
        assert!(Validator::validate_price_level(0).is_err());
        assert!(Validator::validate_price_level(6).is_err());
        assert!(Validator::validate_price_level(3).is_ok());
    }

    #[test]
    fn persona_score_bounds() {
        assert!(Validator::validate_persona_score(0).is_err());
        assert!(Validator::validate_persona_score(11).is_err());
        assert!(Validator::validate_persona_score(1).is_ok());
        assert!(Validator::validate_persona_score(10).is_ok());
    }

    #[test]
    fn coordinates_bounds() {
        assert!(Validator::validate_coordinates(45.0, 13.0).is_ok());
        assert!(Validator::validate_coordinates(91.0, 0.0).is_err());
        assert!(Validator::validate_coordinates(0.0, -181.0).is_err());
    }

    #[test]
    fn pagination_bounds() {
        assert!(Validator::validate_pagination(0, 20).is_ok());
        assert!(Validator::validate_pagination(-1, 20).is_err());
        assert!(Validator::validate_pagination(0, 0).is_err());
        assert!(Validator::validate_pagination(0, 101).is_err());
    }
}
