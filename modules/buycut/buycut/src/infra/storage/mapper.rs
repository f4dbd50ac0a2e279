//! Entity to domain model mappers.

use buycut_sdk::{Brand, Company, User};

use super::entity::{brand, company, user};

impl From<company::Model> for Company {
    fn from(model: company::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            proof: model.proof.0,
            image_url: model.image_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<brand::Model> for Brand {
    fn from(model: brand::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            image_url: model.image_url,
            company_id: model.company_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    #[test]
    fn company_proof_unwraps_json_array() {
        let model = company::Model {
            id: 3,
            name: "Acme".to_owned(),
            slug: "acme".to_owned(),
            description: "why".to_owned(),
            proof: company::Proofs(vec!["a".to_owned(), "b".to_owned()]),
            image_url: "https://img.test/3.png".to_owned(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };

        let domain = Company::from(model);
        assert_eq!(domain.id, 3);
        assert_eq!(domain.proof, ["a", "b"]);
    }

    #[test]
    fn user_mapping_drops_password_hash() {
        let model = user::Model {
            id: 1,
            name: "Jane".to_owned(),
            email: "jane@example.com".to_owned(),
            password_hash: "$2b$04$abc".to_owned(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };

        let domain = User::from(model);
        assert_eq!(domain.email, "jane@example.com");
        assert!(!format!("{domain:?}").contains("$2b$"));
    }
}
