use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::decode::{ResourceItem, ServiceItem};

/// Field map describing one service, keyed by `Name`, `CreationDate`,
/// `ClusterIP` and optionally `ExternalFQDN`.
pub type ServiceRecord = BTreeMap<String, String>;

/// Services and controllers sharing one `kubeware` label value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Kube {
    #[serde(rename = "Services")]
    pub services: Vec<ServiceRecord>,
    #[serde(rename = "Controllers")]
    pub controllers: Vec<String>,
}

/// Group services and controllers by their `kubeware` label.
///
/// Resources without the label are skipped. Members keep the order in which
/// they appear in `services` and `controllers`.
pub fn aggregate(services: &[ServiceItem], controllers: &[ResourceItem]) -> BTreeMap<String, Kube> {
    let mut kubes: BTreeMap<String, Kube> = BTreeMap::new();

    for service in services {
        let Some(name) = service.metadata.kubeware() else {
            continue;
        };
        kubes
            .entry(name.to_string())
            .or_insert_with(Kube::default)
            .services
            .push(service_record(service));
    }

    for controller in controllers {
        let Some(name) = controller.metadata.kubeware() else {
            continue;
        };
        kubes
            .entry(name.to_string())
            .or_insert_with(Kube::default)
            .controllers
            .push(controller.metadata.name.clone());
    }

    debug!(groups = kubes.len(), "aggregated kubeware groups");
    kubes
}

/// Build the field map printed for a single service.
pub fn service_record(service: &ServiceItem) -> ServiceRecord {
    let mut record = ServiceRecord::new();
    record.insert("Name".to_string(), service.metadata.name.clone());
    record.insert(
        "CreationDate".to_string(),
        service.metadata.creation_timestamp.clone(),
    );
    record.insert("ClusterIP".to_string(), service.spec.cluster_ip.clone());
    if let Some(hostname) = service.external_hostname() {
        record.insert("ExternalFQDN".to_string(), hostname.to_string());
    }
    record
}

#[cfg(test)]
mod tests {
    use crate::decode::{LoadBalancerIngress, Metadata};

    use super::*;

    fn metadata(name: &str, kubeware: Option<&str>) -> Metadata {
        let mut labels = BTreeMap::from([("app".to_string(), name.to_string())]);
        if let Some(kubeware) = kubeware {
            labels.insert("kubeware".to_string(), kubeware.to_string());
        }
        Metadata {
            name: name.to_string(),
            labels,
            ..Default::default()
        }
    }

    fn service(name: &str, kubeware: Option<&str>, cluster_ip: &str, hosts: &[&str]) -> ServiceItem {
        let mut item = ServiceItem {
            metadata: metadata(name, kubeware),
            ..Default::default()
        };
        item.spec.cluster_ip = cluster_ip.to_string();
        item.status.load_balancer.ingress = hosts
            .iter()
            .map(|host| LoadBalancerIngress {
                hostname: host.to_string(),
            })
            .collect();
        item
    }

    fn controller(name: &str, kubeware: Option<&str>) -> ResourceItem {
        ResourceItem {
            metadata: metadata(name, kubeware),
        }
    }

    #[test]
    fn groups_service_and_controller_under_label() {
        let services = vec![service("svc1", Some("app1"), "10.0.0.1", &[])];
        let controllers = vec![controller("rc1", Some("app1"))];

        let kubes = aggregate(&services, &controllers);

        let expected = BTreeMap::from([(
            "app1".to_string(),
            Kube {
                services: vec![BTreeMap::from([
                    ("Name".to_string(), "svc1".to_string()),
                    ("CreationDate".to_string(), String::new()),
                    ("ClusterIP".to_string(), "10.0.0.1".to_string()),
                ])],
                controllers: vec!["rc1".to_string()],
            },
        )]);
        assert_eq!(kubes, expected);
    }

    #[test]
    fn unlabelled_resources_are_excluded() {
        let services = vec![
            service("plain", None, "10.0.0.2", &["plain.example.com"]),
            service("web", Some("shop"), "10.0.0.3", &[]),
        ];
        let controllers = vec![controller("orphan", None)];

        let kubes = aggregate(&services, &controllers);

        assert_eq!(kubes.len(), 1);
        let shop = &kubes["shop"];
        assert_eq!(shop.services.len(), 1);
        assert_eq!(shop.services[0]["Name"], "web");
        assert!(shop.controllers.is_empty());
    }

    #[test]
    fn only_unlabelled_service_yields_empty_mapping() {
        let services = vec![service("plain", None, "10.0.0.2", &[])];
        assert!(aggregate(&services, &[]).is_empty());
    }

    #[test]
    fn members_keep_input_order() {
        let services = vec![
            service("b", Some("g"), "10.0.0.2", &[]),
            service("a", Some("g"), "10.0.0.1", &[]),
        ];
        let controllers = vec![controller("rc-z", Some("g")), controller("rc-a", Some("g"))];

        let kubes = aggregate(&services, &controllers);

        let names: Vec<&str> = kubes["g"]
            .services
            .iter()
            .map(|record| record["Name"].as_str())
            .collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(kubes["g"].controllers, ["rc-z", "rc-a"]);
    }

    #[test]
    fn controller_alone_creates_group() {
        let kubes = aggregate(&[], &[controller("rc1", Some("batch"))]);
        assert_eq!(
            kubes["batch"],
            Kube {
                services: Vec::new(),
                controllers: vec!["rc1".to_string()],
            }
        );
    }

    #[test]
    fn empty_label_value_is_its_own_group() {
        let kubes = aggregate(
            &[service("svc", Some(""), "10.0.0.9", &[])],
            &[controller("rc", Some("x"))],
        );
        assert_eq!(kubes.len(), 2);
        assert_eq!(kubes[""].services[0]["Name"], "svc");
    }

    #[test]
    fn external_fqdn_uses_first_ingress_only() {
        let record = service_record(&service(
            "lb",
            Some("g"),
            "10.0.0.5",
            &["first.example.com", "second.example.com"],
        ));
        assert_eq!(record["ExternalFQDN"], "first.example.com");
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn no_ingress_means_no_external_fqdn() {
        let record = service_record(&service("internal", Some("g"), "10.0.0.6", &[]));
        assert!(!record.contains_key("ExternalFQDN"));
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn every_group_is_backed_by_a_labelled_resource() {
        let services = vec![
            service("s1", Some("a"), "", &[]),
            service("s2", None, "", &[]),
            service("s3", Some("b"), "", &[]),
        ];
        let controllers = vec![controller("c1", Some("c")), controller("c2", None)];

        let kubes = aggregate(&services, &controllers);

        for name in kubes.keys() {
            let backed = services
                .iter()
                .map(|s| &s.metadata)
                .chain(controllers.iter().map(|c| &c.metadata))
                .any(|meta| meta.kubeware() == Some(name.as_str()));
            assert!(backed, "group {name} has no labelled resource");
        }
        assert_eq!(kubes.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    }
}
