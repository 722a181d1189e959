//! Demo doctor catalogue loaded at startup.

use medvision_core::portal::{default_bio, map_specialty};

use crate::models::doctor::NewDoctor;
use crate::repositories::DoctorRepo;
use crate::store::Store;

struct SeedDoctor {
    name: &'static str,
    specialty_key: &'static str,
    experience: i32,
    rating: f64,
    hourly_rate: i64,
}

const DOCTORS: &[SeedDoctor] = &[
    SeedDoctor { name: "د. أحمد محمد", specialty_key: "rhinoplasty", experience: 15, rating: 4.9, hourly_rate: 50_000 },
    SeedDoctor { name: "د. فاطمة العلي", specialty_key: "facial", experience: 12, rating: 4.8, hourly_rate: 40_000 },
    SeedDoctor { name: "د. خالد الشمري", specialty_key: "dental", experience: 10, rating: 4.7, hourly_rate: 35_000 },
    SeedDoctor { name: "د. سارة الحربي", specialty_key: "skincare", experience: 8, rating: 4.6, hourly_rate: 30_000 },
    SeedDoctor { name: "د. محمد القحطاني", specialty_key: "جراحة الوجه والفكين", experience: 18, rating: 4.9, hourly_rate: 60_000 },
    SeedDoctor { name: "د. نورا المطيري", specialty_key: "طب تجميل متكامل", experience: 14, rating: 4.8, hourly_rate: 45_000 },
];

/// Insert the demo doctors when the table is empty. Returns how many were added.
pub async fn seed_doctors(store: &Store) -> usize {
    if DoctorRepo::count(store).await > 0 {
        return 0;
    }
    for seed in DOCTORS {
        let specialty = map_specialty(seed.specialty_key).to_string();
        DoctorRepo::create(
            store,
            NewDoctor {
                name: seed.name.to_string(),
                bio: Some(default_bio(&specialty)),
                specialty,
                experience: seed.experience,
                rating: seed.rating,
                avatar: None,
                hourly_rate: seed.hourly_rate,
                email: None,
                phone: None,
            },
        )
        .await;
    }
    tracing::info!(count = DOCTORS.len(), "Seeded demo doctors");
    DOCTORS.len()
}
